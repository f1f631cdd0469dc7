//! Export orchestration
//!
//! This module provides the core export logic for dcexport, including:
//! - The per-publication export loop
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
