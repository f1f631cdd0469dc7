// dcexport - Dublin Core batch import bundles from a publications database
// Copyright (c) 2025 dcexport Contributors
// Licensed under the MIT License

//! # dcexport - Dublin Core batch import bundles
//!
//! dcexport reads publication metadata from a relational database and writes
//! one folder per publication in the layout a digital repository's batch
//! importer expects: a `dublin_core.xml` metadata file, a `contents` manifest
//! and the publication's PDF.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** publications, authors, journal entries, subjects and
//!   keywords from PostgreSQL
//! - **Mapping** each record to Dublin Core fields, dropping empty values
//! - **Writing** XML-safe metadata into zero-padded item folders
//! - **Relocating** PDFs from an intake directory into their bundles
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (field mapping, bundle layout, export run)
//! - [`adapters`] - Database access (trait and PostgreSQL client)
//! - [`domain`] - Records, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dcexport::config::load_config;
//! use dcexport::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("dcexport.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::connect(config, shutdown_rx).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} publications", summary.exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Field mapping
//!
//! ```rust
//! use dcexport::core::dublin_core::format_author;
//! use dcexport::domain::Author;
//!
//! let author = Author { fname: "Jane".into(), lname: "Doe".into() };
//! let field = format_author(&author);
//! assert_eq!(
//!     field.to_xml_line().unwrap(),
//!     "\t<dcvalue element=\"creator\">Doe, Jane</dcvalue>\n"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Fallible library calls return [`domain::Result`], whose error type is
//! [`domain::DcExportError`]. A failed query or a missing PDF does not stop
//! the run; both are logged and counted in the export summary.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
