//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with an `EnvFilter` level
//! - JSON log files with rotation
//! - Helper macros for the export's recurring events
//!
//! # Example
//!
//! ```no_run
//! use dcexport::logging::init_logging;
//! use dcexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Export started");
//! tracing::warn!(pub_id = 7, file = "a.pdf", "Missing PDF, skipping");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a publication
///
/// Emitted at debug level; the verbose setting raises the log level so
/// these lines show up.
///
/// # Example
///
/// ```no_run
/// use dcexport::log_publication_start;
/// use dcexport::domain::PublicationId;
///
/// let pub_id = PublicationId::new(7);
/// log_publication_start!(pub_id, "a.pdf");
/// ```
#[macro_export]
macro_rules! log_publication_start {
    ($pub_id:expr, $file:expr) => {
        tracing::debug!(
            pub_id = %$pub_id,
            file = %$file,
            "Exporting publication"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use dcexport::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dcexport::log_error_with_context;
/// use dcexport::domain::DcExportError;
///
/// let error = DcExportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
