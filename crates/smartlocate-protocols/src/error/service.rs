//! Classification service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ServiceError {
    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Network(_) => true,
            ServiceError::Api { status, .. } => *status >= 500 || *status == 429,
            ServiceError::Authentication(_)
            | ServiceError::InvalidResponse(_)
            | ServiceError::Rejected(_) => false,
        }
    }
}
