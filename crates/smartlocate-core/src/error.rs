//! Locator error types.

use std::time::Duration;

use smartlocate_protocols::{DriverError, ServiceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Review requested but the service returned no review URL for '{0}'")]
    MissingReviewUrl(String),

    #[error("Invalid scale factor: {0}")]
    InvalidScale(String),

    #[error("Cannot decode screenshot: {0}")]
    ScreenshotDecode(String),

    #[error("Lookup cancelled")]
    Cancelled,

    #[error("No prediction after {0:?}")]
    TimedOut(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_failed_display() {
        let err = LocatorError::ClassificationFailed("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Classification failed: quota exceeded");
    }

    #[test]
    fn test_from_driver_error() {
        let err: LocatorError = DriverError::NotConnected("closed".to_string()).into();
        assert!(matches!(err, LocatorError::Driver(_)));
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn test_from_service_error() {
        let err: LocatorError = ServiceError::Authentication("bad key".to_string()).into();
        assert!(matches!(err, LocatorError::Service(_)));
    }

    #[test]
    fn test_timed_out_display() {
        let err = LocatorError::TimedOut(Duration::from_secs(5));
        assert_eq!(err.to_string(), "No prediction after 5s");
    }
}
