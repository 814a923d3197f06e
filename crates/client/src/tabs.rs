//! Tab listing file for a spreadsheet.
//!
//! ```json
//! { "SPREADSHEET_ID": "...", "SHEETS": [{ "name": "Prices", "gid": "1618426698" }] }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheetcsv_core::Error;

/// One tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTab {
    pub name: String,
    pub gid: String,
}

/// The tabs of one spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabConfig {
    #[serde(rename = "SPREADSHEET_ID")]
    pub spreadsheet_id: String,

    #[serde(rename = "SHEETS", default)]
    pub sheets: Vec<SheetTab>,
}

impl TabConfig {
    /// Read and parse a tab listing file.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("tab listing not found at {}", path.display())));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text)
            .map_err(|e| Error::InvalidInput(format!("invalid tab listing {}: {e}", path.display())))
    }

    /// Modification time of the listing file, `None` when it does not exist.
    pub async fn last_modified(path: &Path) -> Result<Option<DateTime<Utc>>, Error> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.modified().ok().map(DateTime::<Utc>::from)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_tab_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tab.json");
        tokio::fs::write(
            &path,
            r#"{"SPREADSHEET_ID":"doc","SHEETS":[{"name":"Prices","gid":"1"},{"name":"Stock","gid":"2"}]}"#,
        )
        .await
        .unwrap();

        let config = TabConfig::load(&path).await.unwrap();
        assert_eq!(config.spreadsheet_id, "doc");
        assert_eq!(config.sheets.len(), 2);
        assert_eq!(config.sheets[1], SheetTab { name: "Stock".into(), gid: "2".into() });
    }

    #[tokio::test]
    async fn test_missing_sheets_defaults_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tab.json");
        tokio::fs::write(&path, r#"{"SPREADSHEET_ID":"doc"}"#).await.unwrap();

        let config = TabConfig::load(&path).await.unwrap();
        assert!(config.sheets.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TabConfig::load(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_last_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tab.json");
        assert!(TabConfig::last_modified(&path).await.unwrap().is_none());

        tokio::fs::write(&path, r#"{"SPREADSHEET_ID":"doc"}"#).await.unwrap();
        assert!(TabConfig::last_modified(&path).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tab.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = TabConfig::load(&path).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
