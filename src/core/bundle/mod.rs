//! Batch import bundles
//!
//! This module writes the per-publication folders the repository's batch
//! importer reads:
//! - [`layout`] - item folders, PDF relocation and the `contents` manifest
//! - [`metadata`] - the `dublin_core.xml` writer
//! - [`naming`] - folder width resolution and filename checks

pub mod layout;
pub mod metadata;
pub mod naming;

pub use layout::{BundleWriter, PdfDisposition, CONTENTS_FILE};
pub use metadata::{DublinCoreWriter, METADATA_FILE};
pub use naming::{escape_filename, resolve_folder_digits};
