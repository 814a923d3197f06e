//! Core types and shared functionality for sheetcsv.
//!
//! This crate provides:
//! - CSV tokenizing and record normalization
//! - TTL-bounded result cache keyed by sheet source
//! - Pull-through orchestration over an injected sheet source
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod parse;
pub mod service;
pub mod source;

pub use cache::{CacheEntry, Clock, ResultCache, SourceKey, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use parse::{Record, RecordParser, parse_csv};
pub use service::{CacheStatus, RefreshOutcome, SheetService, SourceInfo};
pub use source::{DownloadReport, LocalCopy, SheetSource};
