//! Pull-through access to parsed sheets.
//!
//! [`SheetService`] is the only component that reaches outside memory, and
//! only through its injected [`SheetSource`]. A failed load or download leaves
//! any cached entry as it was, stale or not.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Error;
use crate::cache::{Clock, ResultCache, SourceKey, SystemClock};
use crate::parse::{Record, RecordParser};
use crate::source::{DownloadReport, LocalCopy, SheetSource};

/// Result of an explicit refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshOutcome {
    pub download: DownloadReport,
    pub total_rows: usize,
}

/// Cache view of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    pub has_data: bool,
    pub row_count: usize,
    pub last_loaded: Option<DateTime<Utc>>,
    pub total_cached_sheets: usize,
}

/// Everything known about one source without loading it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
    pub csv_url: String,
    pub local_copy: Option<LocalCopy>,
    pub cache: CacheStatus,
}

/// Serves parsed records per source through a TTL-bounded cache.
///
/// Concurrent misses for the same key may each trigger a load; the later
/// `set` wins and both callers get equivalent records.
pub struct SheetService {
    source: Arc<dyn SheetSource>,
    parser: RecordParser,
    cache: RwLock<ResultCache>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl SheetService {
    pub fn new(source: Arc<dyn SheetSource>, ttl: TimeDelta) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn SheetSource>, ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            parser: RecordParser::default(),
            cache: RwLock::new(ResultCache::new(Arc::clone(&clock))),
            clock,
            ttl,
        }
    }

    /// Replace the header rules used for every subsequent parse.
    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Records for `key`, loading and parsing only when the cached entry is
    /// missing or older than the TTL.
    pub async fn records(&self, key: &SourceKey) -> Result<Arc<Vec<Record>>, Error> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(key)
                && entry.is_fresh(self.clock.now(), self.ttl)
            {
                tracing::debug!(source = %key, rows = entry.records().len(), "cache hit");
                return Ok(Arc::clone(entry.records()));
            }
        }

        tracing::debug!(source = %key, "cache miss or stale, loading");
        let text = self.source.load(key).await?;
        let records = self.parser.parse(&text);

        let mut cache = self.cache.write().await;
        Ok(cache.set(key.clone(), records))
    }

    /// Download a fresh export, then re-parse it into the cache.
    ///
    /// The cached entry is replaced only once both the download and the
    /// re-read succeed.
    pub async fn refresh(&self, key: &SourceKey) -> Result<RefreshOutcome, Error> {
        let download = self.source.download(key).await?;
        tracing::info!(source = %key, bytes = download.data_length, "export downloaded");

        let text = self.source.load(key).await?;
        let records = self.parser.parse(&text);

        let records = self.cache.write().await.set(key.clone(), records);
        Ok(RefreshOutcome { download, total_rows: records.len() })
    }

    /// Cache and local copy status for `key`.
    pub async fn info(&self, key: &SourceKey) -> Result<SourceInfo, Error> {
        let local_copy = self.source.local_copy(key).await?;

        let cache = {
            let cache = self.cache.read().await;
            let entry = cache.get(key);
            CacheStatus {
                has_data: entry.is_some(),
                row_count: entry.map(|e| e.records().len()).unwrap_or(0),
                last_loaded: entry.map(|e| e.fetched_at()),
                total_cached_sheets: cache.size(),
            }
        };

        Ok(SourceInfo {
            spreadsheet_id: key.spreadsheet_id.clone(),
            sheet_gid: key.sheet_gid.clone(),
            csv_url: self.source.export_url(key),
            local_copy,
            cache,
        })
    }

    /// Metadata of the local copy behind `key`.
    pub async fn local_copy(&self, key: &SourceKey) -> Result<Option<LocalCopy>, Error> {
        self.source.local_copy(key).await
    }

    /// Drop every cached entry. Returns how many were dropped.
    pub async fn clear(&self) -> usize {
        let cleared = self.cache.write().await.clear();
        tracing::info!(cleared, "cache cleared");
        cleared
    }

    /// Drop the cached entry for one source.
    pub async fn invalidate(&self, key: &SourceKey) -> bool {
        self.cache.write().await.delete(key)
    }

    pub async fn cached_keys(&self) -> Vec<SourceKey> {
        self.cache.read().await.keys()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
