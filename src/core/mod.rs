//! Core business logic for dcexport.
//!
//! # Modules
//!
//! - [`dublin_core`] - Record-to-field mapping and XML-safe values
//! - [`bundle`] - Item folders, PDF relocation and the files the importer reads
//! - [`export`] - The export run and its summary
//!
//! # Export Workflow
//!
//! 1. **Read**: Fetch every publication from the database
//! 2. **Name**: Resolve the item folder width and check every id fits
//! 3. **Bundle**: For each publication with a PDF, create its folder, move
//!    the PDF and write the `contents` manifest
//! 4. **Describe**: Write `dublin_core.xml` from the publication, its
//!    authors, journal entries, subjects and keywords
//! 5. **Report**: Produce the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use dcexport::config::load_config;
//! use dcexport::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dcexport.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::connect(config, shutdown_rx).await?;
//!
//! let summary = coordinator.execute_export().await?;
//! println!("Exported: {}", summary.exported);
//! println!("Missing PDF: {}", summary.skipped_missing_pdf);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod dublin_core;
pub mod export;
