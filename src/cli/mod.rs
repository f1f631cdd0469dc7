//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dcexport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// dcexport - Dublin Core batch import bundles from a publications database
#[derive(Parser, Debug)]
#[command(name = "dcexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dcexport.toml", env = "DCEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DCEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export publications as batch import bundles
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
