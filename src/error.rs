//! Unified error types for Discover-QA

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// One failed driver acquisition strategy
#[derive(Debug, Clone)]
pub struct AcquisitionFailure {
    /// Strategy name (e.g. "system-path")
    pub strategy: String,
    /// Why the strategy failed
    pub reason: String,
}

impl std::fmt::Display for AcquisitionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

fn join_failures(attempts: &[AcquisitionFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for Discover-QA
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error reported by a WebDriver endpoint
    #[error("WebDriver error ({code}): {message}")]
    WebDriver { code: String, message: String },

    /// Every driver acquisition strategy failed
    #[error("Session acquisition failed after {} attempts: {}", .attempts.len(), join_failures(.attempts))]
    SessionAcquisition { attempts: Vec<AcquisitionFailure> },

    /// Driver binary could not be resolved
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Driver archive could not be unpacked
    #[error("Archive error: {0}")]
    Archive(String),

    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Timeout
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Session already closed
    #[error("Session closed: {0}")]
    SessionClosed(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scenario check did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new WebDriver error
    pub fn webdriver<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Error::WebDriver {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new driver not found error
    pub fn driver_not_found<S: Into<String>>(msg: S) -> Self {
        Error::DriverNotFound(msg.into())
    }

    /// Create a new archive error
    pub fn archive<S: Into<String>>(msg: S) -> Self {
        Error::Archive(msg.into())
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(locator: S) -> Self {
        Error::ElementNotFound(locator.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new session closed error
    pub fn session_closed<S: Into<String>>(id: S) -> Self {
        Error::SessionClosed(id.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a new assertion error
    pub fn assertion<S: Into<String>>(msg: S) -> Self {
        Error::Assertion(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this error means "nothing matched" rather than a broken engine
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::ElementNotFound(_) => true,
            Error::WebDriver { code, .. } => code == "no such element",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(Error::element_not_found("css=a").is_not_found());
        assert!(Error::webdriver("no such element", "gone").is_not_found());
        assert!(!Error::webdriver("stale element reference", "detached").is_not_found());
        assert!(!Error::timeout("slow").is_not_found());
    }

    #[test]
    fn test_acquisition_error_lists_attempts() {
        let err = Error::SessionAcquisition {
            attempts: vec![
                AcquisitionFailure {
                    strategy: "system-path".into(),
                    reason: "chromedriver not on PATH".into(),
                },
                AcquisitionFailure {
                    strategy: "remote-endpoint".into(),
                    reason: "connection refused".into(),
                },
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("after 2 attempts"));
        assert!(msg.contains("system-path: chromedriver not on PATH"));
        assert!(msg.contains("remote-endpoint: connection refused"));
    }
}
