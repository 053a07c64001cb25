//! Configuration system for innkeep.
//!
//! Configuration is merged from three sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`INNKEEP_*`)
//! 3. A YAML configuration file (`config.yaml` in the data directory)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("property: {:?}", config.property_name);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::output::OutputFormat;

/// Complete configuration structure.
///
/// Every field is optional; unset fields fall back to built-in defaults at
/// the point of use.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display name of the property, used in report headers.
    pub property_name: Option<String>,

    /// Upper bound on guests per reservation, independent of room capacity.
    pub max_guests_per_booking: Option<u32>,

    /// Maximum time to wait for the database writer lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Default output format for listing and report commands.
    pub output_format: Option<OutputFormat>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// The guest bound to apply when none is configured.
    pub const DEFAULT_MAX_GUESTS: u32 = 12;

    /// Returns the effective guest bound per reservation.
    #[must_use]
    pub fn max_guests(&self) -> u32 {
        self.max_guests_per_booking
            .unwrap_or(Self::DEFAULT_MAX_GUESTS)
    }
}

/// Builder that assembles a [`Config`] from file, environment and
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigBuilder};
///
/// let overrides = Config {
///     property_name: Some("Villa Thalassa".to_string()),
///     ..Config::default()
/// };
///
/// let config = ConfigBuilder::new()
///     .without_env()
///     .with_config(overrides)
///     .build()
///     .unwrap();
/// assert_eq!(config.property_name.as_deref(), Some("Villa Thalassa"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with no file, environment lookup enabled, and no
    /// overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from the given YAML file. A missing file is not
    /// an error; it simply contributes nothing.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables `INNKEEP_*` environment variable lookup, for tests and
    /// embedding.
    #[must_use]
    pub const fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of everything else.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the merged, validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if a merged value fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = &self.file {
            if path.exists() {
                let text = std::fs::read_to_string(path)?;
                let file_config: Config = serde_yaml::from_str(&text)?;
                merge(&mut config, file_config);
            }
        }

        if !self.skip_env {
            merge(&mut config, from_env());
        }

        if let Some(overrides) = self.overrides {
            merge(&mut config, overrides);
        }

        validate(&config)?;
        Ok(config)
    }
}

/// Overlays `higher` on `base`: set fields win, unset fields pass through.
fn merge(base: &mut Config, higher: Config) {
    if higher.property_name.is_some() {
        base.property_name = higher.property_name;
    }
    if higher.max_guests_per_booking.is_some() {
        base.max_guests_per_booking = higher.max_guests_per_booking;
    }
    if higher.maximum_lock_wait_seconds.is_some() {
        base.maximum_lock_wait_seconds = higher.maximum_lock_wait_seconds;
    }
    if higher.output_format.is_some() {
        base.output_format = higher.output_format;
    }
    if higher.disable_autoinit.is_some() {
        base.disable_autoinit = higher.disable_autoinit;
    }
}

/// Reads `INNKEEP_*` environment variables into a partial config.
/// Unparseable values are ignored rather than fatal.
fn from_env() -> Config {
    let mut config = Config::default();

    if let Ok(name) = std::env::var("INNKEEP_PROPERTY_NAME") {
        if !name.trim().is_empty() {
            config.property_name = Some(name.trim().to_string());
        }
    }
    if let Ok(value) = std::env::var("INNKEEP_MAX_GUESTS") {
        if let Ok(n) = value.parse() {
            config.max_guests_per_booking = Some(n);
        }
    }
    if let Ok(value) = std::env::var("INNKEEP_LOCK_WAIT_SECONDS") {
        if let Ok(n) = value.parse() {
            config.maximum_lock_wait_seconds = Some(n);
        }
    }
    if let Ok(value) = std::env::var("INNKEEP_OUTPUT_FORMAT") {
        if let Ok(format) = value.parse() {
            config.output_format = Some(format);
        }
    }

    config
}

fn validate(config: &Config) -> Result<()> {
    if config.max_guests_per_booking == Some(0) {
        return Err(Error::Validation {
            field: "max_guests_per_booking".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.maximum_lock_wait_seconds == Some(0) {
        return Err(Error::Validation {
            field: "maximum_lock_wait_seconds".into(),
            message: "must be at least 1 second".into(),
        });
    }
    Ok(())
}
