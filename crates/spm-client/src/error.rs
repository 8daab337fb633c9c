//! Compile service errors

use thiserror::Error;

/// Failure talking to the compile service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection, timeout or body decoding failure
    #[error("compile service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("compile service error: {status} {reason} {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// The configured base URL cannot be used
    #[error("invalid compile service url '{0}'")]
    InvalidUrl(String),
}

impl ServiceError {
    /// HTTP status code, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}
