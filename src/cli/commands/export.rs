//! Export command implementation
//!
//! This module implements the `export` command, which turns the publications
//! database into batch import bundles.

use crate::config::{load_config, DcExportConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::DcExportError;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Dry run mode - write metadata but leave PDFs in the intake directory
    #[arg(long)]
    pub dry_run: bool,

    /// Log every publication as it is exported
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Override the PDF intake directory
    #[arg(long, value_name = "DIR")]
    pub intake_dir: Option<String>,

    /// Override the item folder width (0 = width of the largest pub_id)
    #[arg(long, value_name = "N")]
    pub folder_digits: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        if config.export.dry_run {
            tracing::info!("Dry run mode enabled - PDFs stay in the intake directory");
            println!("🔍 DRY RUN MODE - PDFs will not be moved");
            println!();
        }

        let coordinator = match ExportCoordinator::connect(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e @ DcExportError::Configuration(_)) => {
                tracing::error!(error = %e, "Invalid database configuration");
                eprintln!("Invalid database configuration: {e}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database");
                eprintln!("Failed to connect to database: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e @ DcExportError::Configuration(_)) => {
                tracing::error!(error = %e, "Export aborted before writing anything");
                eprintln!("Export aborted: {e}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);

        let exit_code = summary.exit_code();
        match exit_code {
            130 => {
                println!("⚠️  Export interrupted. Re-run the same command to finish;");
                println!("   publications already bundled have left the intake directory.");
                tracing::info!("Export interrupted by user signal");
            }
            0 => println!("✅ Export completed successfully!"),
            _ => println!("⚠️  Export completed with skipped or failed publications"),
        }

        Ok(exit_code)
    }

    /// Applies command-line flags on top of the loaded configuration
    fn apply_overrides(&self, config: &mut DcExportConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if self.verbose {
            config.application.verbose = true;
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }

        if let Some(dir) = &self.intake_dir {
            tracing::info!(intake_dir = %dir, "Overriding intake directory from CLI");
            config.export.intake_dir = dir.clone();
        }

        if let Some(digits) = self.folder_digits {
            tracing::info!(folder_digits = digits, "Overriding folder digits from CLI");
            config.export.folder_digits = digits;
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Publications: {}", summary.total_publications);
    println!("  Exported: {}", summary.exported);
    println!("  Missing PDF: {}", summary.skipped_missing_pdf);
    println!("  Failed: {}", summary.failed);
    println!("  Failed Queries: {}", summary.failed_queries);
    if summary.dry_run {
        println!("  PDFs Moved: 0 (dry run)");
    } else {
        println!("  PDFs Moved: {}", summary.pdfs_moved);
    }
    println!("  Folder Digits: {}", summary.folder_digits);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}
