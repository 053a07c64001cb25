//! Utility functions for CLI operations: configuration loading, database
//! opening, argument parsing and output-format resolution.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::CliError;
use innkeep::config::ConfigBuilder;
use innkeep::output::OutputFormat;
use innkeep::{Config, Database, DatabaseConfig, StayRange};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` if given, else `~/.innkeep`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref dir) = global.data_dir {
        return Ok(dir.clone());
    }
    let home = home::home_dir()
        .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".innkeep"))
}

/// Load configuration from the data directory's `config.yaml` plus
/// `INNKEEP_*` environment overrides.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_file(data_dir.join("config.yaml"))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the property database.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled (by flag or configuration).
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join("innkeep.db");

    let autoinit_disabled =
        global.disable_autoinit || config.disable_autoinit.unwrap_or(false);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config
            .with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Resolve a command's output format: `--json` wins, then the configured
/// default, then human.
pub fn resolve_format(json_flag: bool, config: &Config) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        config.output_format.unwrap_or_default()
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArguments(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

/// Parse a timestamp argument: `YYYY-MM-DDTHH:MM[:SS]`, with a space
/// accepted in place of the `T`.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, CliError> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    Err(CliError::InvalidArguments(format!(
        "invalid timestamp '{value}', expected YYYY-MM-DDTHH:MM[:SS]"
    )))
}

/// Parse `--from`/`--to` into a stay window.
pub fn parse_window(from: &str, to: &str) -> Result<StayRange, CliError> {
    let check_in = parse_date(from)?;
    let check_out = parse_date(to)?;
    StayRange::new(check_in, check_out)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Parse a decimal money argument.
pub fn parse_amount(value: &str) -> Result<Decimal, CliError> {
    value
        .parse()
        .map_err(|_| CliError::InvalidArguments(format!("invalid amount '{value}'")))
}

/// Format a money value for human tables.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
