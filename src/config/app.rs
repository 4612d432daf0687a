//! Application configuration loading from config.toml
//!
//! Every field has a default, so the file is optional. Environment variables
//! (usually from `.env`) override the file.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{Error, Result};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Overrides [`AppConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "FINANCE_DATA_DIR";
/// Overrides [`AppConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the persisted state blob
    pub data_dir: PathBuf,
    /// `SQLite` URL to export the state to; export is skipped when absent
    pub database_url: Option<String>,
    /// How long start-up waits for the persisted blob before using defaults
    pub rehydrate_timeout_ms: u64,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database_url: None,
            rehydrate_timeout_ms: 2_000,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub const fn rehydrate_timeout(&self) -> Duration {
        Duration::from_millis(self.rehydrate_timeout_ms)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Empty values are ignored so a blank line in `.env` does not wipe a setting.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(%dir, "Data directory overridden from environment");
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("Database URL overridden from environment");
            self.database_url = Some(url);
        }
    }
}

/// Parses configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML syntax or a value type is invalid
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(AppConfig)` - Parsed configuration, or defaults if the file does not exist
/// * `Err(Error)` - The file exists but could not be read or parsed
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No config file found, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        }),
    }
}

/// Loads ./config.toml and applies environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = load_config(DEFAULT_CONFIG_PATH)?;
    config.apply_overrides(|name| std::env::var(name).ok());
    info!(
        data_dir = %config.data_dir.display(),
        export = config.database_url.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            data_dir = "/var/lib/finance"
            rehydrate_timeout_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/finance"));
        assert_eq!(config.rehydrate_timeout(), Duration::from_millis(500));
        assert_eq!(config.database_url, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = parse_config("rehydrate_timeout_ms = \"soon\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database_url = \"sqlite://finance.sqlite?mode=rwc\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://finance.sqlite?mode=rwc")
        );
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            DATA_DIR_ENV => Some("/tmp/finance".to_string()),
            DATABASE_URL_ENV => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.data_dir, PathBuf::from("/tmp/finance"));
        assert_eq!(config.database_url, None);
    }
}
