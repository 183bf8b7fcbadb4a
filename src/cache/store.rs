//! Time-bounded response storage.
//!
//! Entries are only ever dropped for age, lazily on the read that finds them stale, or
//! all at once through [`ResponseCache::clear`]. There is no size bound.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use metrics::counter;
use tracing::warn;

use super::config::CacheConfig;

const SOURCE: &str = "folio::cache";

/// Lock `mutex`, taking the data back if another task panicked while holding it.
fn guard<'a, T>(mutex: &'a Mutex<T>, op: &'static str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!(target = SOURCE, op, "recovered poisoned cache lock");
        poisoned.into_inner()
    })
}

/// Source of "now" for freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *guard(&self.offset, "manual_clock.advance") += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *guard(&self.offset, "manual_clock.now")
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory key/value store whose entries expire after a fixed freshness window.
///
/// Concurrent misses for the same key are not coalesced; each caller fetches and the
/// last `set` wins.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    freshness: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            freshness: config.freshness,
            clock,
        }
    }

    /// Store `value`, replacing any previous entry for `key`.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        guard(&self.entries, "set").insert(key.into(), entry);
    }

    /// Fresh value for `key`, evicting the entry if it has aged out.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = guard(&self.entries, "get");

        let Some(entry) = entries.get(key) else {
            counter!("folio_api_cache_miss_total").increment(1);
            return None;
        };

        if now.saturating_duration_since(entry.stored_at) < self.freshness {
            counter!("folio_api_cache_hit_total").increment(1);
            return Some(entry.value.clone());
        }

        entries.remove(key);
        counter!("folio_api_cache_expired_total").increment(1);
        counter!("folio_api_cache_miss_total").increment(1);
        None
    }

    pub fn clear(&self) {
        guard(&self.entries, "clear").clear();
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        guard(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
