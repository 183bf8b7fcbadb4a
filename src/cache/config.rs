//! Cache configuration.

use std::time::Duration;

const DEFAULT_FRESHNESS_SECS: u64 = 5 * 60;

/// Tuning for the upstream response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Age at which an entry stops being served.
    pub freshness: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(DEFAULT_FRESHNESS_SECS),
        }
    }
}

impl From<&crate::config::ApiSettings> for CacheConfig {
    fn from(settings: &crate::config::ApiSettings) -> Self {
        Self {
            freshness: settings.cache_ttl,
        }
    }
}
