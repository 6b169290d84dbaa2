//! Unified error types for a11y

use thiserror::Error;

/// Unified error type for all a11y operations
#[derive(Error, Debug)]
pub enum A11yError {
    // Driver errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    // Audit errors
    #[error("Audit result not ready in {slot} after {waited_ms}ms")]
    AuditTimeout { slot: String, waited_ms: u64 },

    #[error("Audit error: {0}")]
    Audit(String),

    #[error("{0}")]
    Inaccessible(String),

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using A11yError
pub type Result<T> = std::result::Result<T, A11yError>;
