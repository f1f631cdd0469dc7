//! Domain error types
//!
//! This module defines the error hierarchy for dcexport.
//! Errors carry messages only and don't expose third-party types.

use thiserror::Error;

/// Main dcexport error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum DcExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query or row conversion errors
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl DcExportError {
    /// Wraps an I/O error with the path or operation it happened on
    pub fn io_context(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        DcExportError::Io(format!("{context}: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DcExportError {
    fn from(err: toml::de::Error) -> Self {
        DcExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
