//! Client code for sheetcsv.
//!
//! This crate provides the spreadsheet export download, local copy storage
//! and tab listing used by the server to feed the core orchestrator.

pub mod fetch;
pub mod source;
pub mod store;
pub mod tabs;

pub use fetch::{ExportClient, FetchConfig, SourceIdError, check_payload, export_url};
pub use source::GoogleSheetsSource;
pub use store::LocalStore;
pub use tabs::{SheetTab, TabConfig};
