//! Error taxonomy for the client.
//!
//! Non-2xx HTTP statuses are not errors; they come back as ordinary
//! [`ResponseRecord`](crate::http::ResponseRecord)s.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced to callers of [`HttpClient`](crate::HttpClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed URL, method, header, or body/form combination.
    /// Raised before any log event or transport activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network, DNS, connect, timeout or body-read failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// JSON body parse failure when parsing was auto-selected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidArgument(_) => "invalid_argument",
            ClientError::Transport(_) => "transport",
            ClientError::Parse(_) => "parse",
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
