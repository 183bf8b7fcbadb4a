//! Folio response cache.
//!
//! Upstream content responses are kept in memory for a fixed freshness window
//! (five minutes unless `api.cache_ttl_seconds` says otherwise):
//!
//! ```toml
//! [api]
//! cache_ttl_seconds = 300
//! ```
//!
//! The clock is injectable so expiry can be exercised without sleeping.

mod config;
mod store;

pub use config::CacheConfig;
pub use store::{Clock, ManualClock, ResponseCache, SystemClock};
