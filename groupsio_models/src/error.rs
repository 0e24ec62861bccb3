use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Error body the server attaches to rejected requests.
///
/// Only bodies carrying `"object": "error"` parse into this shape, which
/// keeps arbitrary non-success payloads from masquerading as API errors.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ApiError {
    pub object: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(default)]
    pub extra: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum ApiErrorType {
    #[serde(rename = "inadequate_permissions")]
    InadequatePermissions,
    #[serde(rename = "bad_request")]
    BadRequest,
    #[serde(rename = "authentication")]
    Authentication,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "rate_limit")]
    RateLimit,
    #[serde(rename = "server")]
    Server,
    #[serde(other)]
    Unknown,
}

impl ApiErrorType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ApiErrorType::InadequatePermissions => "inadequate_permissions",
            ApiErrorType::BadRequest => "bad_request",
            ApiErrorType::Authentication => "authentication",
            ApiErrorType::Expired => "expired",
            ApiErrorType::RateLimit => "rate_limit",
            ApiErrorType::Server => "server",
            ApiErrorType::Unknown => "unknown",
        }
    }
}

impl Display for ApiErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.extra {
            Some(extra) => write!(f, "{} ({extra})", self.error_type),
            None => Display::fmt(&self.error_type, f),
        }
    }
}
