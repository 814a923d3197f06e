//! sheet_data tool implementation.
//!
//! Returns the parsed records of one sheet tab, served from the cache while
//! fresh and re-read from the local copy (or downloaded) otherwise.

use std::time::Instant;

use chrono::Utc;
use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;
use sheetcsv_core::{Error, Record, SheetService, SourceKey};

use super::SourceParams;

/// Output structure for sheet_data tool.
#[derive(Debug, Clone, Serialize)]
pub struct SheetDataOutput<'a> {
    pub data: &'a [Record],
    pub total_rows: usize,
    /// ISO8601 timestamp of the response.
    pub last_updated: String,
    /// File name of the local copy.
    pub source_file: Option<String>,
    pub file_size: Option<u64>,
    pub file_modified: Option<String>,
    pub processing_ms: u64,
    pub spreadsheet_id: &'a str,
    pub sheet_gid: &'a str,
}

/// Implementation of the sheet_data tool.
pub async fn data_impl(
    service: &SheetService, defaults: &SourceKey, params: &SourceParams,
) -> Result<CallToolResult, McpError> {
    let key = params.key(defaults);
    let start = Instant::now();

    let records = service.records(&key).await?;
    let processing_ms = start.elapsed().as_millis() as u64;
    tracing::info!(source = %key, rows = records.len(), processing_ms, "served sheet data");

    let local = service.local_copy(&key).await?;

    let output = SheetDataOutput {
        data: &records,
        total_rows: records.len(),
        last_updated: Utc::now().to_rfc3339(),
        source_file: local
            .as_ref()
            .and_then(|c| c.path.file_name())
            .map(|name| name.to_string_lossy().into_owned()),
        file_size: local.as_ref().map(|c| c.size),
        file_modified: local.as_ref().and_then(|c| c.modified).map(|m| m.to_rfc3339()),
        processing_ms,
        spreadsheet_id: &key.spreadsheet_id,
        sheet_gid: &key.sheet_gid,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize records: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
