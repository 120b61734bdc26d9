//! Error types for lookup collaborators.

use sahayak_core::error::AssistError;

/// Errors from an encyclopedia lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no page found for topic")]
    NotFound,
    #[error("topic is ambiguous: {}", .0.join(", "))]
    Ambiguous(Vec<String>),
    #[error("lookup service error: {0}")]
    Service(String),
}

impl From<LookupError> for AssistError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => AssistError::TopicNotFound,
            LookupError::Ambiguous(options) => AssistError::TopicAmbiguous(options),
            LookupError::Service(msg) => AssistError::ServiceUnavailable(msg),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Service(err.to_string())
    }
}

/// Errors from opening a URL.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("launcher failed: {0}")]
    Failed(String),
}

impl From<LaunchError> for AssistError {
    fn from(err: LaunchError) -> Self {
        AssistError::ServiceUnavailable(err.to_string())
    }
}
