//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the dcexport configuration file.

use crate::adapters::postgresql::redact_connection_string;
use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Verbose: {}", config.application.verbose);
        println!(
            "  Database: {}",
            redact_connection_string(config.database.connection_string.expose_secret().as_ref())
        );
        println!("  SSL Mode: {}", config.database.ssl_mode);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Intake Directory: {}", config.export.intake_dir);
        if config.export.folder_digits == 0 {
            println!("  Folder Digits: auto");
        } else {
            println!("  Folder Digits: {}", config.export.folder_digits);
        }
        println!("  Dry Run: {}", config.export.dry_run);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
