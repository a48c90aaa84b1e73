//! CDP error types.

use smartlocate_protocols::DriverError;
use thiserror::Error;

/// CDP protocol error code for failed DOM lookups.
pub const SERVER_ERROR: i64 = -32000;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to the browser.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Browser not found or not running with remote debugging.
    #[error("Browser not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    BrowserNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error returned by the browser for a command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error during endpoint discovery.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Whether the browser rejected a DOM lookup, for example a bad selector
    /// or a node that no longer exists.
    pub fn is_server_error(&self) -> bool {
        matches!(self, CdpError::Protocol { code, .. } if *code == SERVER_ERROR)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(_)
            | CdpError::BrowserNotAvailable(_)
            | CdpError::WebSocket(_)
            | CdpError::Http(_)
            | CdpError::SessionClosed => DriverError::NotConnected(e.to_string()),
            CdpError::Timeout(message) => DriverError::Timeout(message),
            other => DriverError::CommandFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = CdpError::Protocol {
            code: -32000,
            message: "Could not find node with given id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CDP error: Could not find node with given id (code: -32000)"
        );
        assert!(err.is_server_error());
    }

    #[test]
    fn test_other_protocol_codes() {
        let err = CdpError::Protocol {
            code: -32601,
            message: "method not found".to_string(),
        };
        assert!(!err.is_server_error());
        assert!(!CdpError::SessionClosed.is_server_error());
    }

    #[test]
    fn test_into_driver_error() {
        let err: DriverError = CdpError::SessionClosed.into();
        assert!(matches!(err, DriverError::NotConnected(_)));

        let err: DriverError = CdpError::Timeout("DOM.getBoxModel".to_string()).into();
        assert!(matches!(err, DriverError::Timeout(m) if m == "DOM.getBoxModel"));

        let err: DriverError = CdpError::JavaScript("boom".to_string()).into();
        assert!(matches!(err, DriverError::CommandFailed(m) if m.contains("boom")));
    }

    #[test]
    fn test_url_parse_error() {
        let err: CdpError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CdpError::ConnectionFailed(_)));
    }
}
