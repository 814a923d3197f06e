//! sheet_refresh tool implementation.
//!
//! Downloads a fresh export and re-parses it into the cache.

use chrono::Utc;
use rmcp::{ErrorData as McpError, model::*};
use serde::{Deserialize, Serialize};
use sheetcsv_core::{DownloadReport, Error, SheetService, SourceKey};

use super::SourceParams;

/// Output structure for sheet_refresh tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRefreshOutput {
    pub message: String,
    pub download: DownloadReport,
    pub total_rows: usize,
    /// ISO8601 timestamp of the refresh.
    pub refresh_time: String,
    pub spreadsheet_id: String,
    pub sheet_gid: String,
}

/// Implementation of the sheet_refresh tool.
pub async fn refresh_impl(
    service: &SheetService, defaults: &SourceKey, params: &SourceParams,
) -> Result<CallToolResult, McpError> {
    let key = params.key(defaults);
    let outcome = service.refresh(&key).await?;

    let output = SheetRefreshOutput {
        message: "CSV data refreshed successfully".into(),
        download: outcome.download,
        total_rows: outcome.total_rows,
        refresh_time: Utc::now().to_rfc3339(),
        spreadsheet_id: key.spreadsheet_id,
        sheet_gid: key.sheet_gid,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
