//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DcExportConfig;
use super::secret_string;
use crate::domain::errors::DcExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DcExportConfig
/// 4. Applies environment variable overrides (DCEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dcexport::config::loader::load_config;
///
/// let config = load_config("dcexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DcExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DcExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DcExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DcExportConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DcExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DcExportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(DcExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using DCEXPORT_* prefix
///
/// Environment variables follow the pattern: DCEXPORT_<SECTION>_<KEY>
/// For example: DCEXPORT_EXPORT_OUTPUT_DIR, DCEXPORT_DATABASE_SSL_MODE
fn apply_env_overrides(config: &mut DcExportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DCEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DCEXPORT_APPLICATION_VERBOSE") {
        config.application.verbose = parse_bool("DCEXPORT_APPLICATION_VERBOSE", &val)?;
    }

    // Database overrides
    if let Ok(val) = std::env::var("DCEXPORT_DATABASE_CONNECTION_STRING") {
        config.database.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("DCEXPORT_DATABASE_CONNECT_TIMEOUT_SECONDS") {
        config.database.connect_timeout_seconds =
            parse_number("DCEXPORT_DATABASE_CONNECT_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("DCEXPORT_DATABASE_STATEMENT_TIMEOUT_SECONDS") {
        config.database.statement_timeout_seconds =
            parse_number("DCEXPORT_DATABASE_STATEMENT_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("DCEXPORT_DATABASE_SSL_MODE") {
        config.database.ssl_mode = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("DCEXPORT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("DCEXPORT_EXPORT_INTAKE_DIR") {
        config.export.intake_dir = val;
    }
    if let Ok(val) = std::env::var("DCEXPORT_EXPORT_FOLDER_DIGITS") {
        config.export.folder_digits = parse_number("DCEXPORT_EXPORT_FOLDER_DIGITS", &val)?;
    }
    if let Ok(val) = std::env::var("DCEXPORT_EXPORT_DRY_RUN") {
        config.export.dry_run = parse_bool("DCEXPORT_EXPORT_DRY_RUN", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DCEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("DCEXPORT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DCEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DCEXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(DcExportError::Configuration(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        DcExportError::Configuration(format!("{name} must be a non-negative integer, got '{value}'"))
    })
}
