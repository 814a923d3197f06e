//! Export URL construction and source id validation.

use std::sync::LazyLock;

use regex::Regex;
use sheetcsv_core::{Error, SourceKey};

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid id pattern"));

/// Error type for source id validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceIdError {
    #[error("empty {0}")]
    Empty(&'static str),

    #[error("invalid {field}: {value:?} (allowed: letters, digits, '-', '_')")]
    InvalidChars { field: &'static str, value: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<SourceIdError> for Error {
    fn from(err: SourceIdError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

/// Check that both ids are non-empty and safe to embed in URLs and file names.
pub fn validate(key: &SourceKey) -> Result<(), SourceIdError> {
    check_id("spreadsheet_id", &key.spreadsheet_id)?;
    check_id("sheet_gid", &key.sheet_gid)
}

fn check_id(field: &'static str, value: &str) -> Result<(), SourceIdError> {
    if value.is_empty() {
        return Err(SourceIdError::Empty(field));
    }
    if !ID_PATTERN.is_match(value) {
        return Err(SourceIdError::InvalidChars { field, value: value.to_string() });
    }
    Ok(())
}

/// Build the CSV export URL for one tab under `base`.
///
/// With the default base:
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv&gid=<gid>&single=true&output=csv`
pub fn export_url(base: &str, key: &SourceKey) -> Result<url::Url, SourceIdError> {
    validate(key)?;

    let base = if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
    let mut url = url::Url::parse(&base)
        .and_then(|base| base.join(&format!("{}/export", key.spreadsheet_id)))
        .map_err(|e| SourceIdError::InvalidUrl(e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("format", "csv")
        .append_pair("gid", &key.sheet_gid)
        .append_pair("single", "true")
        .append_pair("output", "csv");

    Ok(url)
}
