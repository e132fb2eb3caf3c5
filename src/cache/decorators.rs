//! Store decorators: hit/miss accounting and access logging.
//!
//! Both wrap any [`ShortlistStore`] and implement it themselves, so they
//! compose in either order. The service stacks them as
//! `LoggingStore<StatsStore<MokaStore>>`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::aggregate::Shortlist;

use super::store::ShortlistStore;

/// Counts lookups against the wrapped store.
pub struct StatsStore<S> {
    inner: S,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: ShortlistStore> StatsStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn reset_counters(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ShortlistStore> ShortlistStore for StatsStore<S> {
    fn get(&self, job_id: &str) -> Option<Arc<Shortlist>> {
        let found = self.inner.get(job_id);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    fn put(&self, job_id: &str, shortlist: Arc<Shortlist>, ttl: Duration) {
        self.inner.put(job_id, shortlist, ttl);
    }

    // Only lookups are counted; everything else passes through.
    fn contains(&self, job_id: &str) -> bool {
        self.inner.contains(job_id)
    }

    fn remove(&self, job_id: &str) -> bool {
        self.inner.remove(job_id)
    }

    fn clear(&self) {
        self.inner.clear();
    }

    fn len(&self) -> u64 {
        self.inner.len()
    }
}

/// Logs every store operation at debug level.
pub struct LoggingStore<S> {
    inner: S,
}

impl<S: ShortlistStore> LoggingStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ShortlistStore> ShortlistStore for LoggingStore<S> {
    fn get(&self, job_id: &str) -> Option<Arc<Shortlist>> {
        let found = self.inner.get(job_id);
        tracing::debug!(job_id, hit = found.is_some(), "shortlist cache lookup");
        found
    }

    fn put(&self, job_id: &str, shortlist: Arc<Shortlist>, ttl: Duration) {
        tracing::debug!(
            job_id,
            candidates = shortlist.candidates.len(),
            ttl_secs = ttl.as_secs(),
            "shortlist cached"
        );
        self.inner.put(job_id, shortlist, ttl);
    }

    fn contains(&self, job_id: &str) -> bool {
        self.inner.contains(job_id)
    }

    fn remove(&self, job_id: &str) -> bool {
        let removed = self.inner.remove(job_id);
        tracing::debug!(job_id, removed, "shortlist cache eviction");
        removed
    }

    fn clear(&self) {
        tracing::info!("shortlist cache flushed");
        self.inner.clear();
    }

    fn len(&self) -> u64 {
        self.inner.len()
    }
}
