//! sheet_info tool implementation.
//!
//! Reports cache and local copy status without loading anything.

use rmcp::{ErrorData as McpError, model::*};
use sheetcsv_core::{Error, SheetService, SourceKey};

use super::SourceParams;

/// Implementation of the sheet_info tool.
pub async fn info_impl(
    service: &SheetService, defaults: &SourceKey, params: &SourceParams,
) -> Result<CallToolResult, McpError> {
    let key = params.key(defaults);
    let info = service.info(&key).await?;

    let json = serde_json::to_string_pretty(&info)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
