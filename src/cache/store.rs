//! In-memory shortlist store (moka-backed) with per-entry TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;

use crate::aggregate::Shortlist;

/// Storage backend for generated shortlists, keyed by job id.
pub trait ShortlistStore: Send + Sync {
    /// Returns the cached shortlist, if present and not expired.
    fn get(&self, job_id: &str) -> Option<Arc<Shortlist>>;

    /// Stores a shortlist, replacing any existing entry for the job.
    fn put(&self, job_id: &str, shortlist: Arc<Shortlist>, ttl: Duration);

    /// Whether a live entry exists, without counting as a lookup.
    fn contains(&self, job_id: &str) -> bool;

    /// Removes the entry for one job. Returns whether an entry existed.
    fn remove(&self, job_id: &str) -> bool;

    /// Drops every entry in the store.
    fn clear(&self);

    /// Number of live entries.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
struct StoredEntry {
    shortlist: Arc<Shortlist>,
    ttl: Duration,
}

/// Per-entry TTL: each insert carries its own expiry.
struct PerEntryTtl;

impl Expiry<String, StoredEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-backed store with LRU eviction and per-entry TTL.
pub struct MokaStore {
    entries: Cache<String, StoredEntry>,
}

impl MokaStore {
    pub const DEFAULT_CAPACITY: u64 = 1_000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortlistStore for MokaStore {
    fn get(&self, job_id: &str) -> Option<Arc<Shortlist>> {
        self.entries.get(job_id).map(|entry| entry.shortlist)
    }

    fn put(&self, job_id: &str, shortlist: Arc<Shortlist>, ttl: Duration) {
        self.entries
            .insert(job_id.to_string(), StoredEntry { shortlist, ttl });
    }

    fn contains(&self, job_id: &str) -> bool {
        self.entries.contains_key(job_id)
    }

    fn remove(&self, job_id: &str) -> bool {
        self.entries.remove(job_id).is_some()
    }

    fn clear(&self) {
        self.entries.invalidate_all();
    }

    fn len(&self) -> u64 {
        // entry_count is eventually consistent; sync pending maintenance
        // first so tests and the stats endpoint see fresh numbers.
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}
