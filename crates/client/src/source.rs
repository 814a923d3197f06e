//! Spreadsheet export source backed by HTTP and a local data directory.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sheetcsv_core::{AppConfig, DownloadReport, Error, LocalCopy, SheetSource, SourceKey};

use crate::fetch::{ExportClient, FetchConfig, validate};
use crate::store::LocalStore;

/// Loads exports from the local copy, downloading when there is none.
pub struct GoogleSheetsSource {
    client: ExportClient,
    store: LocalStore,
}

impl GoogleSheetsSource {
    pub fn new(client: ExportClient, store: LocalStore) -> Self {
        Self { client, store }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = ExportClient::new(FetchConfig::from(config))?;
        Ok(Self::new(client, LocalStore::new(&config.data_dir)))
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    async fn fetch_and_store(&self, key: &SourceKey) -> Result<(String, DownloadReport), Error> {
        let url = self.client.export_url(key)?;
        tracing::info!(source = %key, %url, "downloading export");

        let text = self.client.fetch_csv(&url).await?;
        let file_path = self.store.write(key, &text).await?;

        let report = DownloadReport {
            spreadsheet_id: key.spreadsheet_id.clone(),
            sheet_gid: key.sheet_gid.clone(),
            file_path,
            csv_url: url.to_string(),
            data_length: text.chars().count(),
            data_lines: text.split('\n').count(),
            sha256: hex::encode(Sha256::digest(text.as_bytes())),
            download_time: Utc::now(),
        };

        tracing::info!(
            source = %key,
            chars = report.data_length,
            lines = report.data_lines,
            path = %report.file_path.display(),
            "export saved"
        );

        Ok((text, report))
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    async fn load(&self, key: &SourceKey) -> Result<String, Error> {
        validate(key)?;

        if let Some(text) = self.store.read(key).await? {
            tracing::debug!(source = %key, chars = text.len(), "read local copy");
            return Ok(text);
        }

        tracing::info!(source = %key, "no local copy, downloading");
        let (text, _) = self.fetch_and_store(key).await?;
        Ok(text)
    }

    async fn download(&self, key: &SourceKey) -> Result<DownloadReport, Error> {
        validate(key)?;
        let (_, report) = self.fetch_and_store(key).await?;
        Ok(report)
    }

    async fn local_copy(&self, key: &SourceKey) -> Result<Option<LocalCopy>, Error> {
        validate(key)?;
        self.store.stat(key).await
    }

    fn export_url(&self, key: &SourceKey) -> String {
        self.client.export_url(key).map(String::from).unwrap_or_default()
    }
}
