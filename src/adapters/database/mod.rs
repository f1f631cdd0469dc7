//! Database abstraction layer
//!
//! This module provides the trait-based access to the publications database,
//! the best-effort reader used by the export and the SQL it runs.

pub mod queries;
pub mod reader;
pub mod traits;

pub use reader::RecordReader;
pub use traits::Database;
