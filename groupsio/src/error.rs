use groupsio_models::{error::ApiError, id::GroupId};
use hyper::StatusCode;
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug)]
pub enum ErrorKind {
    /// URI or request assembly failed before anything was sent.
    BuildingRequest,
    /// The connection failed; the server was never reached or dropped us.
    Sending,
    /// Collecting the response body failed.
    ChunkingResponse,
    /// The body did not match the expected shape.
    Deserialize,
    /// Non-success status whose body was not a parseable API error.
    Response {
        route: String,
        status: StatusCode,
        bytes: Vec<u8>,
    },
    /// The server rejected the request with a structured error body.
    Api {
        route: String,
        status: StatusCode,
        error: ApiError,
    },
    /// The client-side permission precheck failed; the guarded request was
    /// never issued.
    InadequatePermissions { group_id: GroupId },
    /// The remote API does not implement this operation; no I/O occurred.
    Unsupported { operation: &'static str },
    /// The pagination loop stopped making progress (missing, repeated, or
    /// cyclic continuation token).
    PaginationStalled { route: String, pages: usize },
}

#[derive(Debug)]
pub struct GroupsError {
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) kind: ErrorKind,
}

#[derive(Debug)]
pub struct DeserializeBodyError {
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) bytes: Vec<u8>,
}

impl GroupsError {
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_source(self) -> Option<Box<dyn StdError + Send + Sync>> {
        self.source
    }

    pub fn into_parts(self) -> (ErrorKind, Option<Box<dyn StdError + Send + Sync>>) {
        (self.kind, self.source)
    }

    pub(crate) const fn unsupported(operation: &'static str) -> Self {
        Self {
            source: None,
            kind: ErrorKind::Unsupported { operation },
        }
    }

    pub(crate) const fn inadequate_permissions(group_id: GroupId) -> Self {
        Self {
            source: None,
            kind: ErrorKind::InadequatePermissions { group_id },
        }
    }
}

impl Display for GroupsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.kind() {
            ErrorKind::BuildingRequest => write!(f, "failed to build the request"),
            ErrorKind::Sending => write!(f, "sending the request failed"),
            ErrorKind::ChunkingResponse => write!(f, "chunking the response failed"),
            ErrorKind::Deserialize => write!(f, "error deserializing"),
            ErrorKind::Response {
                route,
                status,
                bytes: _,
            } => write!(f, "failed with {status} on {route}"),
            ErrorKind::Api {
                route,
                status,
                error,
            } => write!(f, "api error {error} with {status} on {route}"),
            ErrorKind::InadequatePermissions { group_id } => {
                write!(f, "missing the required permission on group {group_id}")
            }
            ErrorKind::Unsupported { operation } => {
                write!(f, "{operation} is not implemented by the remote API")
            }
            ErrorKind::PaginationStalled { route, pages } => {
                write!(f, "pagination made no progress after {pages} pages on {route}")
            }
        }
    }
}

impl StdError for GroupsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}

impl Display for DeserializeBodyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let display = String::from_utf8_lossy(&self.bytes);
        write!(f, "bytes: {display}")
    }
}

impl StdError for DeserializeBodyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}
