//! cache_clear tool implementation.
//!
//! Drops every cached sheet so the next read re-parses its local copy.

use chrono::Utc;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::{Deserialize, Serialize};
use sheetcsv_core::{Error, SheetService};

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearOutput {
    /// Number of entries removed.
    pub cleared: usize,
    pub message: String,
    pub cleared_at: String,
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(service: &SheetService) -> Result<CallToolResult, McpError> {
    let cleared = service.clear().await;

    let output = CacheClearOutput {
        cleared,
        message: format!("Cleared cache for {cleared} sheet(s)"),
        cleared_at: Utc::now().to_rfc3339(),
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{SHEET, StaticSource, output_json, service};
    use sheetcsv_core::SourceKey;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_impl() {
        let source = Arc::new(StaticSource::new(SHEET));
        let service = service(source.clone());
        service.records(&SourceKey::new("doc", "1")).await.unwrap();
        service.records(&SourceKey::new("doc", "2")).await.unwrap();

        let result = clear_impl(&service).await.unwrap();
        let output: CacheClearOutput = serde_json::from_value(output_json(&result)).unwrap();
        assert_eq!(output.cleared, 2);
        assert_eq!(output.message, "Cleared cache for 2 sheet(s)");

        service.records(&SourceKey::new("doc", "1")).await.unwrap();
        assert_eq!(source.loads(), 3);
    }

    #[tokio::test]
    async fn test_clear_impl_empty() {
        let service = service(Arc::new(StaticSource::new(SHEET)));
        let result = clear_impl(&service).await.unwrap();
        let output: CacheClearOutput = serde_json::from_value(output_json(&result)).unwrap();
        assert_eq!(output.cleared, 0);
    }
}
