//! On-disk copies of downloaded exports.
//!
//! One file per source: `<data_dir>/sheets-<spreadsheetId>-<sheetGid>.csv`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sheetcsv_core::{Error, LocalCopy, SourceKey};

/// Directory of downloaded CSV files.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File path for one source. Ids must already be validated.
    pub fn path_for(&self, key: &SourceKey) -> PathBuf {
        self.data_dir
            .join(format!("sheets-{}-{}.csv", key.spreadsheet_id, key.sheet_gid))
    }

    /// Write `text` as the copy for `key`, creating the data directory if needed.
    pub async fn write(&self, key: &SourceKey, text: &str) -> Result<PathBuf, Error> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, text).await?;
        tracing::debug!(path = %path.display(), chars = text.len(), "local copy written");
        Ok(path)
    }

    /// Read the copy for `key`, or `None` if it does not exist.
    pub async fn read(&self, key: &SourceKey) -> Result<Option<String>, Error> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Size and modification time of the copy for `key`.
    pub async fn stat(&self, key: &SourceKey) -> Result<Option<LocalCopy>, Error> {
        let path = self.path_for(key);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => {
                let modified = meta.modified().ok().map(DateTime::<Utc>::from);
                Ok(Some(LocalCopy { path, size: meta.len(), modified }))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
