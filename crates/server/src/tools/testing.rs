//! Shared fixtures for tool tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use rmcp::model::CallToolResult;
use sheetcsv_core::{DownloadReport, Error, LocalCopy, SheetService, SheetSource, SourceKey};

pub(crate) const SHEET: &str = "อัพเดจราคา,รูป,รหัส,รายละเอียด,ช่วงราคา,100-300\n\
                                Shirt,img.png,A1,\"Soft\ncotton\",90,\"100\n+Shipping 20\"\n\
                                Hat,hat.png,A2,Wool,50,60\n";

/// In-memory source serving fixed text.
pub(crate) struct StaticSource {
    text: Mutex<Result<String, fn() -> Error>>,
    pub(crate) loads: AtomicUsize,
}

impl StaticSource {
    pub(crate) fn new(text: &str) -> Self {
        Self { text: Mutex::new(Ok(text.to_string())), loads: AtomicUsize::new(0) }
    }

    pub(crate) fn failing(make: fn() -> Error) -> Self {
        Self { text: Mutex::new(Err(make)), loads: AtomicUsize::new(0) }
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn text(&self) -> Result<String, Error> {
        match &*self.text.lock().unwrap() {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

#[async_trait]
impl SheetSource for StaticSource {
    async fn load(&self, _key: &SourceKey) -> Result<String, Error> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.text()
    }

    async fn download(&self, key: &SourceKey) -> Result<DownloadReport, Error> {
        let text = self.text()?;
        Ok(DownloadReport {
            spreadsheet_id: key.spreadsheet_id.clone(),
            sheet_gid: key.sheet_gid.clone(),
            file_path: PathBuf::from(format!("data/sheets-{key}.csv")),
            csv_url: self.export_url(key),
            data_length: text.chars().count(),
            data_lines: text.split('\n').count(),
            sha256: "00".repeat(32),
            download_time: Utc::now(),
        })
    }

    async fn local_copy(&self, key: &SourceKey) -> Result<Option<LocalCopy>, Error> {
        Ok(Some(LocalCopy {
            path: PathBuf::from(format!("data/sheets-{key}.csv")),
            size: 128,
            modified: Some(Utc::now()),
        }))
    }

    fn export_url(&self, key: &SourceKey) -> String {
        format!("https://example.com/{}/{}", key.spreadsheet_id, key.sheet_gid)
    }
}

pub(crate) fn service(source: Arc<StaticSource>) -> Arc<SheetService> {
    Arc::new(SheetService::new(source, TimeDelta::minutes(5)))
}

pub(crate) fn defaults() -> SourceKey {
    SourceKey::new("doc", "1")
}

/// Parse the JSON text payload of a tool result.
pub(crate) fn output_json(result: &CallToolResult) -> serde_json::Value {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    let text = content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
