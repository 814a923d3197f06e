//! sheet_list tool implementation.
//!
//! Lists the tabs described by the tab listing file.

use std::path::Path;

use rmcp::{ErrorData as McpError, model::*};
use serde::{Deserialize, Serialize};
use sheetcsv_client::{SheetTab, TabConfig};
use sheetcsv_core::Error;

/// Output structure for sheet_list tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetListOutput {
    pub spreadsheet_id: String,
    pub total_sheets: usize,
    pub sheets: Vec<SheetTab>,
    /// ISO8601 modification time of the listing file.
    pub last_modified: Option<String>,
}

/// Implementation of the sheet_list tool.
pub async fn list_impl(tabs_path: &Path) -> Result<CallToolResult, McpError> {
    let config = TabConfig::load(tabs_path).await?;
    let last_modified = TabConfig::last_modified(tabs_path).await?;

    let output = SheetListOutput {
        spreadsheet_id: config.spreadsheet_id,
        total_sheets: config.sheets.len(),
        sheets: config.sheets,
        last_modified: last_modified.map(|m| m.to_rfc3339()),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
