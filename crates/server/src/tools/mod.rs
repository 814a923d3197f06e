//! MCP tool implementations.
//!
//! This module contains all tools exposed by the sheetcsv server.

pub mod cache;
pub mod health;
pub mod sheet_data;
pub mod sheet_info;
pub mod sheet_list;
pub mod sheet_refresh;

#[cfg(test)]
pub(crate) mod testing;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sheetcsv_core::SourceKey;

/// Identifies the spreadsheet tab a tool call targets.
///
/// Both ids are optional and fall back to the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SourceParams {
    /// Spreadsheet document id.
    #[serde(default, alias = "spreadsheetId")]
    pub spreadsheet_id: Option<String>,

    /// Sheet tab gid.
    #[serde(default, alias = "sheetGid")]
    pub sheet_gid: Option<String>,
}

impl SourceParams {
    pub fn key(&self, defaults: &SourceKey) -> SourceKey {
        SourceKey::resolve(self.spreadsheet_id.as_deref(), self.sheet_gid.as_deref(), defaults)
    }
}
