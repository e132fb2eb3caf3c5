use std::sync::Arc;

use crate::cache::ShortlistCacheService;
use crate::matching::Matcher;
use crate::pipeline::ShortlistPipeline;

/// Shared handler state: the pipeline plus direct handles to the cache
/// service and matcher for the stats and health endpoints.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ShortlistPipeline>,
    pub cache: Arc<ShortlistCacheService>,
    pub matcher: Arc<Matcher>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<ShortlistPipeline>,
        cache: Arc<ShortlistCacheService>,
        matcher: Arc<Matcher>,
    ) -> Self {
        Self {
            pipeline,
            cache,
            matcher,
        }
    }
}
