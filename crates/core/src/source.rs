//! The refresh collaborator the orchestrator depends on.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::cache::SourceKey;

/// Metadata of the on-disk copy of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCopy {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Summary of one completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
    pub file_path: PathBuf,
    pub csv_url: String,
    /// Characters in the body.
    pub data_length: usize,
    pub data_lines: usize,
    /// Hex SHA-256 of the body.
    pub sha256: String,
    pub download_time: DateTime<Utc>,
}

/// Supplies raw CSV text for a source.
///
/// Implementations own network and file I/O. Failures must use the
/// distinguishable fetch kinds of [`Error`] so callers can tell a timeout
/// from a login page from an empty body.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Raw CSV for `key`, from the local copy when one exists, downloading otherwise.
    async fn load(&self, key: &SourceKey) -> Result<String, Error>;

    /// Download a fresh export for `key`, replacing any local copy.
    async fn download(&self, key: &SourceKey) -> Result<DownloadReport, Error>;

    /// Metadata of the local copy, if present.
    async fn local_copy(&self, key: &SourceKey) -> Result<Option<LocalCopy>, Error>;

    /// The upstream URL `key` is exported from.
    fn export_url(&self, key: &SourceKey) -> String;
}
