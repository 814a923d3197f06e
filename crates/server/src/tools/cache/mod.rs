//! Cache-related MCP tools.
//!
//! This module provides tools for managing the in-memory record cache.

pub mod clear;

pub use clear::{CacheClearOutput, clear_impl};
