use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{GroupId, SubscriptionId, UserId};

/// One user's membership of one group.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SubscriptionStatus {
    #[serde(rename = "sub_status_normal")]
    Normal,
    #[serde(rename = "sub_status_pending")]
    Pending,
    #[serde(rename = "sub_status_banned")]
    Banned,
}

impl SubscriptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Normal => "sub_status_normal",
            SubscriptionStatus::Pending => "sub_status_pending",
            SubscriptionStatus::Banned => "sub_status_banned",
        }
    }
}

/// Sparse field-set for the `updatemember` endpoint, same contract as
/// [`GroupUpdate`](crate::group::GroupUpdate): unset fields never appear
/// in the body.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionUpdate {
    full_name: Option<String>,
    status: Option<SubscriptionStatus>,
}

impl SubscriptionUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.status.is_none()
    }

    #[must_use]
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(full_name) = &self.full_name {
            pairs.push(("full_name", full_name.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}
