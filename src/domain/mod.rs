//! Domain models and types for dcexport.
//!
//! This module contains the records read from the publications database and
//! the error types shared across the crate.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`PublicationId`]) with output folder naming
//! - **Database rows** ([`Row`]) and the typed records read from them
//!   ([`Publication`], [`JournalEntry`], [`Author`], [`Subject`], [`Keyword`])
//! - **Error types** ([`DcExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Reading records
//!
//! ```rust
//! use dcexport::domain::{Publication, Row};
//!
//! # fn example() -> dcexport::domain::Result<()> {
//! let row = Row::new()
//!     .with("pub_id", 7)
//!     .with("title", "A Study")
//!     .with("pub_file", "a.pdf");
//!
//! let publication: Publication = row.to_record()?;
//! assert_eq!(publication.pub_id.folder_name(4).unwrap(), "0007");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod publication;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use errors::DcExportError;
pub use ids::PublicationId;
pub use publication::{Author, JournalEntry, Keyword, Publication, Subject};
pub use result::Result;
pub use row::Row;
