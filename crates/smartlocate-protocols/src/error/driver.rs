//! Automation driver errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Not connected to a browser: {0}")]
    NotConnected(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Element is no longer attached: {0}")]
    StaleElement(String),

    #[error("Driver command failed: {0}")]
    CommandFailed(String),

    #[error("Driver command timed out: {0}")]
    Timeout(String),
}
