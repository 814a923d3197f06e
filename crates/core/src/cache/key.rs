//! Source identifiers for cached results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one exported tab: the spreadsheet document and its sheet gid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceKey {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
}

impl SourceKey {
    pub fn new(spreadsheet_id: impl Into<String>, sheet_gid: impl Into<String>) -> Self {
        Self { spreadsheet_id: spreadsheet_id.into(), sheet_gid: sheet_gid.into() }
    }

    /// Resolve request ids against defaults. Blank ids count as missing.
    pub fn resolve(spreadsheet_id: Option<&str>, sheet_gid: Option<&str>, defaults: &SourceKey) -> Self {
        let pick = |given: Option<&str>, fallback: &str| {
            given
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            spreadsheet_id: pick(spreadsheet_id, &defaults.spreadsheet_id),
            sheet_gid: pick(sheet_gid, &defaults.sheet_gid),
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.spreadsheet_id, self.sheet_gid)
    }
}
