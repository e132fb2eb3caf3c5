//! Shortlist cache service: the decorated store plus runtime toggling,
//! default TTL, and the stats snapshot served by the gateway.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::aggregate::Shortlist;

use super::decorators::{LoggingStore, StatsStore};
use super::store::{MokaStore, ShortlistStore};

/// How many job keys the service remembers for the stats endpoint.
const TRACKED_KEYS_CAP: usize = 64;
/// How many recent keys a stats snapshot reports.
const RECENT_KEYS_REPORTED: usize = 10;

/// Cache tuning, normally sourced from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub capacity: u64,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(1800),
            capacity: MokaStore::DEFAULT_CAPACITY,
            enabled: true,
        }
    }
}

/// One recently accessed cache key.
#[derive(Debug, Clone, Serialize)]
pub struct RecentAccess {
    pub job_id: String,
    pub last_access: DateTime<Utc>,
}

/// Snapshot of cache effectiveness, served by `GET /api/integration/cache/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub hit_count: u64,
    pub miss_count: u64,
    pub total_requests: u64,
    /// Formatted as a percentage, e.g. `"66.67%"`.
    pub hit_rate: String,
    pub cache_size: u64,
    pub ttl_secs: u64,
    /// Most recently accessed job ids, newest first.
    pub recent_jobs: Vec<RecentAccess>,
}

/// Caching layer in front of shortlist generation.
///
/// Lookups and writes go through the decorated store; a disabled service
/// reports every lookup as a bypass without touching the counters.
pub struct ShortlistCacheService {
    store: LoggingStore<StatsStore<MokaStore>>,
    enabled: AtomicBool,
    default_ttl: Duration,
    last_access: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl ShortlistCacheService {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: LoggingStore::new(StatsStore::new(MokaStore::with_capacity(config.capacity))),
            enabled: AtomicBool::new(config.enabled),
            default_ttl: config.ttl,
            last_access: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Toggles the cache at runtime. Disabling does not drop entries.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        tracing::info!(enabled, "shortlist cache toggled");
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Cached shortlist for a job, or `None` on miss or when disabled.
    pub fn get(&self, job_id: &str) -> Option<Arc<Shortlist>> {
        if !self.is_enabled() {
            return None;
        }
        let found = self.store.get(job_id);
        if found.is_some() {
            self.track_access(job_id);
        }
        found
    }

    /// Caches a shortlist under the service's default TTL.
    pub fn put(&self, job_id: &str, shortlist: Arc<Shortlist>) {
        self.put_with_ttl(job_id, shortlist, self.default_ttl);
    }

    /// Caches a shortlist with an explicit TTL.
    pub fn put_with_ttl(&self, job_id: &str, shortlist: Arc<Shortlist>, ttl: Duration) {
        if !self.is_enabled() {
            return;
        }
        self.store.put(job_id, shortlist, ttl);
        self.track_access(job_id);
    }

    /// Whether a shortlist is cached for the job. Does not touch the
    /// hit/miss counters.
    pub fn contains(&self, job_id: &str) -> bool {
        self.is_enabled() && self.store.contains(job_id)
    }

    /// Evicts one job's shortlist. Returns whether an entry existed.
    pub fn evict(&self, job_id: &str) -> bool {
        self.last_access.lock().remove(job_id);
        self.store.remove(job_id)
    }

    /// Flushes the entire store and the recency tracking.
    pub fn clear(&self) {
        self.last_access.lock().clear();
        self.store.clear();
    }

    /// Point-in-time stats snapshot.
    pub fn stats(&self) -> CacheStats {
        let stats_layer = self.store.inner();
        let hit_count = stats_layer.hit_count();
        let miss_count = stats_layer.miss_count();
        let total = hit_count + miss_count;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hit_count as f64 / total as f64 * 100.0
        };

        let mut recent: Vec<RecentAccess> = self
            .last_access
            .lock()
            .iter()
            .map(|(key, at)| RecentAccess {
                job_id: key.clone(),
                last_access: *at,
            })
            .collect();
        recent.sort_by(|a, b| b.last_access.cmp(&a.last_access));
        recent.truncate(RECENT_KEYS_REPORTED);

        CacheStats {
            enabled: self.is_enabled(),
            hit_count,
            miss_count,
            total_requests: total,
            hit_rate: format!("{hit_rate:.2}%"),
            cache_size: self.store.len(),
            ttl_secs: self.default_ttl.as_secs(),
            recent_jobs: recent,
        }
    }

    /// Records an access for the stats endpoint, keeping the map bounded.
    fn track_access(&self, job_id: &str) {
        let mut tracked = self.last_access.lock();
        tracked.insert(job_id.to_string(), Utc::now());

        while tracked.len() > TRACKED_KEYS_CAP {
            let oldest = tracked
                .iter()
                .min_by_key(|(_, at)| **at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => tracked.remove(&key),
                None => break,
            };
        }
    }
}

impl std::fmt::Debug for ShortlistCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortlistCacheService")
            .field("enabled", &self.is_enabled())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
