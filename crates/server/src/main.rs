//! sheetcsv server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use sheetcsv_client::GoogleSheetsSource;
use sheetcsv_core::{AppConfig, SheetService};
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let defaults = config.default_source();
    tracing::info!(
        source = %defaults,
        data_dir = %config.data_dir.display(),
        ttl_secs = config.cache_ttl_secs,
        "Starting sheetcsv server on stdio transport"
    );

    let source = GoogleSheetsSource::from_config(&config)?;
    let service = Arc::new(SheetService::new(Arc::new(source), config.cache_ttl()));

    match service.records(&defaults).await {
        Ok(records) => tracing::info!(source = %defaults, rows = records.len(), "warmed default source"),
        Err(e) => tracing::warn!(source = %defaults, "could not warm default source: {}", e),
    }

    let handler = handler::SheetCsvServer::new(service, defaults, config.tabs_path());
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
