//! Dublin Core metadata
//!
//! - [`field`] - the `(element, qualifier, value)` triple and its XML line
//! - [`formatter`] - record-to-field mapping and [`RecordKind`]
//! - [`sanitize`] - suppression rules and XML-safe text

pub mod field;
pub mod formatter;
pub mod sanitize;

pub use field::DublinCoreField;
pub use formatter::{
    format_author, format_journal, format_keyword, format_publication, format_subject, RecordKind,
};
