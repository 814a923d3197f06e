//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a default source id is empty, and
    /// `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `cache_ttl_secs` is 0 or exceeds 24 hours
    /// - `user_agent` is empty
    /// - `export_base` is not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "default_spreadsheet_id".into(),
                hint: "Set SHEETCSV_DEFAULT_SPREADSHEET_ID environment variable".into(),
            });
        }
        if self.default_sheet_gid.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "default_sheet_gid".into(),
                hint: "Set SHEETCSV_DEFAULT_SHEET_GID environment variable".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be at least 1s".into() });
        }
        if self.cache_ttl_secs > 86_400 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must not exceed 24 hours (86400s)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if !(self.export_base.starts_with("https://") || self.export_base.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "export_base".into(),
                reason: "must be an http(s) URL".into(),
            });
        }

        if self.max_redirects == 0 {
            tracing::warn!("max_redirects is 0; export URLs usually redirect once before serving CSV");
        }

        Ok(())
    }
}
