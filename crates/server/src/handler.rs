//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::path::PathBuf;
use std::sync::Arc;

use crate::tools::{
    SourceParams, cache::clear_impl, health::health_impl, sheet_data::data_impl, sheet_info::info_impl,
    sheet_list::list_impl, sheet_refresh::refresh_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use sheetcsv_core::{SheetService, SourceKey};

/// The main MCP server handler for sheetcsv.
#[derive(Clone)]
pub struct SheetCsvServer {
    tool_router: ToolRouter<Self>,
    service: Arc<SheetService>,
    defaults: SourceKey,
    tabs_path: PathBuf,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl SheetCsvServer {
    /// Create a new server handler.
    pub fn new(service: Arc<SheetService>, defaults: SourceKey, tabs_path: PathBuf) -> Self {
        Self { tool_router: Self::tool_router(), service, defaults, tabs_path }
    }

    /// Parsed records of one sheet tab.
    ///
    /// Served from the cache while fresh; otherwise re-read from the local copy,
    /// downloading the export when no copy exists.
    #[tool(
        description = "Get the parsed records of a spreadsheet tab. Both ids default to the configured sheet. Returns JSON with data, total_rows and local file metadata."
    )]
    async fn sheet_data(&self, params: Parameters<SourceParams>) -> Result<CallToolResult, McpError> {
        data_impl(&self.service, &self.defaults, &params.0).await
    }

    #[tool(description = "Download a fresh CSV export for a spreadsheet tab and rebuild its cached records.")]
    async fn sheet_refresh(&self, params: Parameters<SourceParams>) -> Result<CallToolResult, McpError> {
        refresh_impl(&self.service, &self.defaults, &params.0).await
    }

    #[tool(description = "Show export URL, local copy metadata and cache status for a spreadsheet tab.")]
    async fn sheet_info(&self, params: Parameters<SourceParams>) -> Result<CallToolResult, McpError> {
        info_impl(&self.service, &self.defaults, &params.0).await
    }

    #[tool(description = "List the sheet tabs configured in the tab listing file.")]
    async fn sheet_list(&self) -> Result<CallToolResult, McpError> {
        list_impl(&self.tabs_path).await
    }

    /// Drop every cached sheet.
    #[tool(description = "Clear all cached records. Local CSV copies are kept.")]
    async fn cache_clear(&self) -> Result<CallToolResult, McpError> {
        clear_impl(&self.service).await
    }

    #[tool(description = "Report server status and the sources currently cached.")]
    async fn health(&self) -> Result<CallToolResult, McpError> {
        health_impl(&self.service).await
    }
}

impl ServerHandler for SheetCsvServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "sheetcsv".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Serves normalized records parsed from published spreadsheet CSV exports. \
                 Use sheet_data to read, sheet_refresh to pull a new export."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{SHEET, StaticSource, defaults, service};

    #[test]
    fn test_router_lists_all_tools() {
        let server = SheetCsvServer::new(service(Arc::new(StaticSource::new(SHEET))), defaults(), "tab.json".into());
        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["cache_clear", "health", "sheet_data", "sheet_info", "sheet_list", "sheet_refresh"]);
    }

    #[test]
    fn test_server_info() {
        let server = SheetCsvServer::new(service(Arc::new(StaticSource::new(SHEET))), defaults(), "tab.json".into());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "sheetcsv");
        assert!(info.capabilities.tools.is_some());
    }
}
