//! In-memory cache of parsed records keyed by source.
//!
//! - One entry per (spreadsheet, tab) pair
//! - Entries carry their fetch time; freshness is the caller's decision
//! - Explicit invalidation and full clear, no capacity bound

pub mod clock;
pub mod key;
pub mod results;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::SourceKey;
pub use results::{CacheEntry, ResultCache};
