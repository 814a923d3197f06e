//! health tool implementation.

use chrono::Utc;
use rmcp::{ErrorData as McpError, model::*};
use serde::{Deserialize, Serialize};
use sheetcsv_core::{Error, SheetService};

/// Output structure for health tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthOutput {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub total_cached_sheets: usize,
    /// Cached sources as `<spreadsheetId>-<sheetGid>`.
    pub cache_entries: Vec<String>,
}

/// Implementation of the health tool.
pub async fn health_impl(service: &SheetService) -> Result<CallToolResult, McpError> {
    let keys = service.cached_keys().await;

    let output = HealthOutput {
        status: "OK".into(),
        timestamp: Utc::now().to_rfc3339(),
        service: "sheetcsv".into(),
        total_cached_sheets: keys.len(),
        cache_entries: keys.iter().map(ToString::to_string).collect(),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
