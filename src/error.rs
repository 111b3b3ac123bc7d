//! Error handling module for QuickLook
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Recoverable fetch failures never reach this type: the session records them
//! as validity flags and feedback text. These errors are for the outer shell
//! (terminal setup, configuration, headless commands).

use crate::gateway::GatewayError;
use thiserror::Error;

/// Main error type for QuickLook
#[derive(Error, Debug)]
pub enum QuicklookError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pricing API errors surfaced by headless commands
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Validation errors (user input, CLI values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for QuickLook operations
pub type Result<T> = std::result::Result<T, QuicklookError>;

impl QuicklookError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
