//! HTTP gateway layer (Axum) over the shortlist pipeline and cache.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handler::health_handler))
        .route(
            "/api/integration/jobs/{job_id}/select",
            post(handler::select_candidates_handler),
        )
        .route(
            "/api/integration/jobs/{job_id}/shortlist",
            get(handler::get_shortlist_handler),
        )
        .route(
            "/api/integration/cache/stats",
            get(handler::cache_stats_handler),
        )
        .route(
            "/api/integration/cache/{job_id}",
            delete(handler::evict_handler),
        )
        .route("/api/integration/cache", delete(handler::clear_cache_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
