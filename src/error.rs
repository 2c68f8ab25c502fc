//! # Error Types
//!
//! Custom error types for Gyro Look using `thiserror`.

use thiserror::Error;

/// Main error type for Gyro Look
#[derive(Debug, Error)]
pub enum GyroLookError {
    /// No DualSense controller found on the system
    #[error("no DualSense controller found")]
    ControllerNotFound,

    /// Controller I/O errors
    #[error("controller error: {0}")]
    Controller(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Trace record serialization errors
    #[error("trace serialization error: {0}")]
    Trace(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Gyro Look
pub type Result<T> = std::result::Result<T, GyroLookError>;
