#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod group;
pub mod id;
pub mod page;
pub mod permissions;
pub mod subscription;
