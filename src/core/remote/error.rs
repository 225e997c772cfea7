//! Remote adapter error types

use thiserror::Error;

/// Errors from REST operations against the portal backends
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connection, timeout, body decode)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered outside the 2xx range
    #[error("Unexpected status: {status}")]
    Status {
        /// Status code the server returned
        status: reqwest::StatusCode,
    },
}

impl RemoteError {
    /// Whether the error is a 404 from the server
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
