//! Configuration file
//!
//! ```json
//! { "catalog_dir": "./catalog", "log_level": "info", "log_format": "text" }
//! ```
//!
//! A relative `catalog_dir` is resolved against the directory holding
//! the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding series and index rule definitions (required)
    pub catalog_dir: String,

    /// Log filter directive (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "text" or "json" (optional, default "text")
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config = Self::from_json(&content)?;

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.catalog_dir.trim().is_empty() {
            return Err(CliError::config_error("catalog_dir must not be empty"));
        }

        if self.log_format != "text" && self.log_format != "json" {
            return Err(CliError::config_error(format!(
                "Invalid log_format: '{}'. Must be 'text' or 'json'.",
                self.log_format
            )));
        }

        EnvFilter::try_new(&self.log_level).map_err(|e| {
            CliError::config_error(format!("Invalid log_level '{}': {}", self.log_level, e))
        })?;

        Ok(())
    }

    /// Catalog directory, resolved against the config file location
    pub fn catalog_path(&self, config_path: &Path) -> PathBuf {
        let dir = Path::new(&self.catalog_dir);
        if dir.is_absolute() {
            return dir.to_path_buf();
        }
        match config_path.parent() {
            Some(parent) => parent.join(dir),
            None => dir.to_path_buf(),
        }
    }

    /// Installs the global tracing subscriber. Output goes to stderr.
    ///
    /// `RUST_LOG` overrides the configured level when set. Returns false
    /// when another subscriber was already installed; that one stays.
    pub fn init_logging(&self) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = if self.log_format == "json" {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        match installed {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "LOGGING_ALREADY_INITIALIZED");
                false
            }
        }
    }
}
