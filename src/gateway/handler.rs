use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::aggregate::Shortlist;
use crate::cache::CacheStats;

use super::error::GatewayError;
use super::state::AppState;

/// `POST /api/integration/jobs/{job_id}/select`: always recomputes,
/// replacing any cached shortlist.
#[instrument(skip(state))]
pub async fn select_candidates_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Shortlist>, GatewayError> {
    let shortlist = state.pipeline.generate_shortlist(&job_id).await?;
    Ok(Json((*shortlist).clone()))
}

/// `GET /api/integration/jobs/{job_id}/shortlist`: cache-aware read.
#[instrument(skip(state))]
pub async fn get_shortlist_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Shortlist>, GatewayError> {
    let shortlist = state.pipeline.get_shortlist(&job_id).await?;
    Ok(Json((*shortlist).clone()))
}

/// `GET /api/integration/cache/stats`
#[instrument(skip(state))]
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

#[derive(serde::Serialize)]
pub struct EvictResponse {
    pub job_id: String,
    pub evicted: bool,
}

/// `DELETE /api/integration/cache/{job_id}`
#[instrument(skip(state))]
pub async fn evict_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Json<EvictResponse> {
    let evicted = state.cache.evict(&job_id);
    Json(EvictResponse { job_id, evicted })
}

#[derive(serde::Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}

/// `DELETE /api/integration/cache`
#[instrument(skip(state))]
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear();
    Json(ClearResponse { cleared: true })
}

#[derive(serde::Serialize)]
pub struct HealthzResponse {
    pub status: &'static str,
    pub match_service: &'static str,
    pub cache_enabled: bool,
}

/// `GET /healthz`: process liveness plus upstream reachability. The match
/// service being down never fails the probe; it degrades the report.
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let match_service = if state.matcher.health().await.is_available() {
        "available"
    } else {
        "unavailable"
    };

    (
        StatusCode::OK,
        Json(HealthzResponse {
            status: "ok",
            match_service,
            cache_enabled: state.cache.is_enabled(),
        }),
    )
        .into_response()
}
