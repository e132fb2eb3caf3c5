//! Shortlist caching: moka store, accounting/logging decorators, and the
//! cache service the pipeline and gateway share.

pub mod decorators;
pub mod service;
pub mod store;


pub use decorators::{LoggingStore, StatsStore};
pub use service::{CacheConfig, CacheStats, RecentAccess, ShortlistCacheService};
pub use store::{MokaStore, ShortlistStore};
