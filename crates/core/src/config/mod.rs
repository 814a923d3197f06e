//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SHEETCSV_*)
//! 2. TOML config file (if SHEETCSV_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::SourceKey;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SHEETCSV_*)
/// 2. TOML config file (if SHEETCSV_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Spreadsheet used when a request names none.
    ///
    /// Set via SHEETCSV_DEFAULT_SPREADSHEET_ID environment variable.
    #[serde(default = "default_spreadsheet_id")]
    pub default_spreadsheet_id: String,

    /// Sheet tab used when a request names none.
    ///
    /// Set via SHEETCSV_DEFAULT_SHEET_GID environment variable.
    #[serde(default = "default_sheet_gid")]
    pub default_sheet_gid: String,

    /// Directory holding downloaded CSV copies.
    ///
    /// Set via SHEETCSV_DATA_DIR environment variable.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Tab listing file. Falls back to `<data_dir>/tab.json`.
    ///
    /// Set via SHEETCSV_TABS_FILE environment variable.
    #[serde(default)]
    pub tabs_file: Option<PathBuf>,

    /// Base URL the export path `<id>/export` is joined onto.
    ///
    /// Set via SHEETCSV_EXPORT_BASE environment variable.
    #[serde(default = "default_export_base")]
    pub export_base: String,

    /// User-Agent string for export downloads.
    ///
    /// Set via SHEETCSV_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Download timeout in milliseconds.
    ///
    /// Set via SHEETCSV_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum redirects followed per download.
    ///
    /// Set via SHEETCSV_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Maximum bytes accepted per download.
    ///
    /// Set via SHEETCSV_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// How long parsed records stay fresh, in seconds.
    ///
    /// Set via SHEETCSV_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_spreadsheet_id() -> String {
    "174dcynBTIagtj0JckoVh248dXXncdi0I".into()
}

fn default_sheet_gid() -> String {
    "1618426698".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_export_base() -> String {
    "https://docs.google.com/spreadsheets/d/".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_spreadsheet_id: default_spreadsheet_id(),
            default_sheet_gid: default_sheet_gid(),
            data_dir: default_data_dir(),
            tabs_file: None,
            export_base: default_export_base(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            max_bytes: default_max_bytes(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Freshness window for cached records.
    pub fn cache_ttl(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.cache_ttl_secs as i64).unwrap_or(TimeDelta::MAX)
    }

    /// The source key used when a request omits one or both ids.
    pub fn default_source(&self) -> SourceKey {
        SourceKey::new(&self.default_spreadsheet_id, &self.default_sheet_gid)
    }

    /// Resolved location of the tab listing file.
    pub fn tabs_path(&self) -> PathBuf {
        self.tabs_file.clone().unwrap_or_else(|| self.data_dir.join("tab.json"))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SHEETCSV_`
    /// 2. TOML file from `SHEETCSV_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SHEETCSV_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SHEETCSV_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
