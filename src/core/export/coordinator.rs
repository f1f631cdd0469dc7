//! Export coordinator - main orchestrator for the export process
//!
//! Reads every publication, then writes one bundle per publication whose PDF
//! is present in the intake directory. Publications are handled one at a
//! time in query order.

use crate::adapters::database::queries;
use crate::adapters::database::{Database, RecordReader};
use crate::adapters::postgresql::PostgreSQLClient;
use crate::config::DcExportConfig;
use crate::core::bundle::{escape_filename, resolve_folder_digits, BundleWriter, PdfDisposition};
use crate::core::dublin_core::{format_publication, RecordKind};
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::domain::{Publication, PublicationId, Result, Row};
use crate::{log_export_complete, log_publication_start};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    config: DcExportConfig,
    reader: RecordReader,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Connects to the configured PostgreSQL database
    ///
    /// # Errors
    ///
    /// Returns a connection error if the database is unreachable.
    pub async fn connect(
        config: DcExportConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let client = PostgreSQLClient::connect(&config.database).await?;
        Ok(Self::new(config, Arc::new(client), shutdown_signal))
    }

    /// Create a coordinator over an already opened database
    pub fn new(
        config: DcExportConfig,
        database: Arc<dyn Database>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            reader: RecordReader::new(database),
            shutdown_signal,
        }
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Reads all publications
    /// 2. Resolves the folder width and checks every identifier fits
    /// 3. For each publication with a PDF, writes its bundle
    /// 4. Closes the database and returns the summary
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an identifier does not fit the folder
    /// width. Nothing has been written at that point. Per-publication
    /// failures are recorded in the summary instead.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.config.export.dry_run);

        tracing::info!(
            database = %self.reader.database().describe(),
            output_dir = %self.config.export.output_dir,
            intake_dir = %self.config.export.intake_dir,
            dry_run = self.config.export.dry_run,
            "Starting export process"
        );

        let rows = self.reader.get_recordset(queries::PUBLICATIONS, None).await;
        summary.total_publications = rows.len();
        let publications = read_publications(&rows, &mut summary);

        let ids: Vec<PublicationId> = publications.iter().map(|p| p.pub_id).collect();
        let folder_digits = match resolve_folder_digits(self.config.export.folder_digits, &ids) {
            Ok(width) => width,
            Err(e) => {
                self.close_database().await;
                return Err(e);
            }
        };
        summary.folder_digits = folder_digits;

        let writer = BundleWriter::from_config(&self.config.export, folder_digits);

        tracing::info!(
            count = publications.len(),
            folder_digits,
            "Processing publications"
        );

        for publication in &publications {
            if *self.shutdown_signal.borrow() {
                tracing::warn!(
                    processed = summary.processed(),
                    remaining = summary.total_publications - summary.processed(),
                    "Shutdown requested, stopping before next publication"
                );
                summary.interrupted = true;
                break;
            }

            let file = escape_filename(&publication.pub_file);
            log_publication_start!(publication.pub_id, file);

            if !writer.has_pdf(&publication.pub_file) {
                tracing::warn!(
                    pub_id = %publication.pub_id,
                    file = %file,
                    "Missing PDF, skipping"
                );
                summary.skipped_missing_pdf += 1;
                continue;
            }

            match self.export_publication(&writer, publication).await {
                Ok(disposition) => {
                    summary.exported += 1;
                    if disposition != PdfDisposition::DryRun {
                        summary.pdfs_moved += 1;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        pub_id = %publication.pub_id,
                        file = %file,
                        error = %e,
                        "Failed to export publication"
                    );
                    summary.failed += 1;
                    summary.add_error(
                        ExportError::new(ExportErrorType::Filesystem, e.to_string())
                            .with_context(format!("pub_id={}", publication.pub_id)),
                    );
                }
            }
        }

        summary.failed_queries = self.reader.failed_queries();
        self.close_database().await;

        let duration = start_time.elapsed();
        summary = summary.with_duration(duration);
        summary.log_summary();
        log_export_complete!(summary.exported, duration);

        Ok(summary)
    }

    /// Writes one publication's bundle
    ///
    /// The folder is created and the PDF moved before any metadata is
    /// written, matching what the batch importer expects to find.
    async fn export_publication(
        &self,
        writer: &BundleWriter,
        publication: &Publication,
    ) -> Result<PdfDisposition> {
        let item_dir = writer.create_item_dir(publication.pub_id)?;
        let disposition = writer.move_pdf(&item_dir, &publication.pub_file)?;
        writer.write_contents(&item_dir, &publication.pub_file)?;

        let mut metadata = writer.create_metadata(&item_dir)?;
        metadata.write_fields(&format_publication(publication))?;

        for kind in RecordKind::ORDER {
            let rows = self
                .reader
                .get_recordset(kind.sql(), Some(publication.pub_id.value()))
                .await;
            for row in &rows {
                match kind.format(row) {
                    Ok(fields) => metadata.write_fields(&fields)?,
                    Err(e) => {
                        tracing::warn!(
                            pub_id = %publication.pub_id,
                            kind = %kind,
                            error = %e,
                            "Skipping unreadable row"
                        );
                    }
                }
            }
        }

        let written = metadata.written();
        let suppressed = metadata.suppressed();
        metadata.finish()?;

        tracing::debug!(
            pub_id = %publication.pub_id,
            dir = %item_dir.display(),
            fields = written,
            suppressed,
            "Publication exported"
        );

        Ok(disposition)
    }

    async fn close_database(&self) {
        if let Err(e) = self.reader.database().close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }
    }
}

/// Reads publication rows, recording the ones that cannot be read
fn read_publications(rows: &[Row], summary: &mut ExportSummary) -> Vec<Publication> {
    let mut publications = Vec::with_capacity(rows.len());
    for row in rows {
        match row.to_record::<Publication>() {
            Ok(publication) => publications.push(publication),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    pub_id = ?row.get("pub_id"),
                    "Unreadable publication row"
                );
                summary.failed += 1;
                summary.add_error(
                    ExportError::new(ExportErrorType::Record, e.to_string())
                        .with_context(format!("row={:?}", row.get("pub_id"))),
                );
            }
        }
    }
    publications
}
