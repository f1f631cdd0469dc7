//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Publications returned by the main query
    pub total_publications: usize,

    /// Publications written as bundles
    pub exported: usize,

    /// Publications skipped because their PDF is missing
    pub skipped_missing_pdf: usize,

    /// Publications that could not be read or written
    pub failed: usize,

    /// Queries that failed and were treated as empty
    pub failed_queries: usize,

    /// PDFs relocated from the intake directory
    pub pdfs_moved: usize,

    /// Folder width used for this run
    pub folder_digits: usize,

    /// PDFs were left in place
    pub dry_run: bool,

    /// The run stopped early on a shutdown signal
    pub interrupted: bool,

    pub started_at: DateTime<Utc>,

    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            total_publications: 0,
            exported: 0,
            skipped_missing_pdf: 0,
            failed: 0,
            failed_queries: 0,
            pdfs_moved: 0,
            folder_digits: 0,
            dry_run,
            interrupted: false,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Publications handled before the run ended
    pub fn processed(&self) -> usize {
        self.exported + self.skipped_missing_pdf + self.failed
    }

    /// True when every publication was exported and every query succeeded
    pub fn is_successful(&self) -> bool {
        self.failed == 0
            && self.skipped_missing_pdf == 0
            && self.failed_queries == 0
            && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_publications == 0 {
            return 100.0;
        }
        (self.exported as f64 / self.total_publications as f64) * 100.0
    }

    /// Process exit code for this run
    ///
    /// 130 when interrupted, 1 when anything was skipped or failed, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            total = self.total_publications,
            exported = self.exported,
            skipped_missing_pdf = self.skipped_missing_pdf,
            failed = self.failed,
            failed_queries = self.failed_queries,
            pdfs_moved = self.pdfs_moved,
            folder_digits = self.folder_digits,
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// A publication row could not be read
    Record,
    /// Creating the folder, moving the PDF or writing a file failed
    Filesystem,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g. the publication id)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
