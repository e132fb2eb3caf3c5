//! Router-level tests: each request goes through the full Axum stack via
//! `tower::ServiceExt::oneshot` against in-memory providers and the mock
//! match backend.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::aggregate::{AggregationConfig, ScoreAggregator};
use crate::cache::{CacheConfig, ShortlistCacheService};
use crate::domain::{CandidateProfile, Job};
use crate::evaluator::ProfileEvaluator;
use crate::matching::{MatchClientConfig, Matcher, MockMatchClient};
use crate::pipeline::{InMemoryDirectory, InMemoryMatchStore, ShortlistPipeline};

use super::state::AppState;
use super::create_router;

struct Fixture {
    router: Router,
    directory: Arc<InMemoryDirectory>,
    match_store: Arc<InMemoryMatchStore>,
    backend: Arc<MockMatchClient>,
}

fn fixture() -> Fixture {
    let directory = Arc::new(InMemoryDirectory::new());
    let match_store = Arc::new(InMemoryMatchStore::new());
    let backend = Arc::new(MockMatchClient::new());
    let cache = Arc::new(ShortlistCacheService::new(CacheConfig {
        ttl: Duration::from_secs(60),
        ..CacheConfig::default()
    }));
    let matcher = Arc::new(Matcher::new(backend.clone(), MatchClientConfig::default()));

    // All weight on the AI component so tests can script final scores
    // through the match store.
    let aggregator = ScoreAggregator::new(AggregationConfig::with_weights(1.0, 0.0, 0.0))
        .expect("valid weights");

    let pipeline = Arc::new(ShortlistPipeline::new(
        directory.clone(),
        directory.clone(),
        match_store.clone(),
        Arc::new(ProfileEvaluator::new()),
        aggregator,
        matcher.clone(),
        cache.clone(),
    ));

    Fixture {
        router: create_router(AppState::new(pipeline, cache, matcher)),
        directory,
        match_store,
        backend,
    }
}

fn job(job_id: &str) -> Job {
    Job {
        id: job_id.to_string(),
        title: "Backend Engineer".to_string(),
        description: String::new(),
        requirements: String::new(),
        skills: vec!["Rust".to_string()],
        location: None,
        job_type: None,
        salary_min: None,
        salary_max: None,
        min_experience_years: 1,
    }
}

fn candidate(id: &str) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        name: format!("Candidate {id}"),
        email: String::new(),
        summary: None,
        location: None,
        skills: vec![],
        experience: vec![],
        education: vec![],
        languages: vec![],
        complete: false,
    }
}

fn seed_job(fixture: &Fixture, job_id: &str, scores: &[(&str, f64)]) {
    fixture.directory.insert_job(job(job_id));
    fixture.directory.insert_candidates(
        job_id,
        scores.iter().map(|(id, _)| candidate(id)).collect(),
    );
    for (id, score) in scores {
        fixture.match_store.set_score(job_id, id, *score);
    }
}

async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, json)
}

#[tokio::test]
async fn test_healthz_reports_match_service() {
    let fx = fixture();

    let (status, body) = send(&fx.router, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["match_service"], "available");
    assert_eq!(body["cache_enabled"], true);

    fx.backend.fail();
    let (status, body) = send(&fx.router, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match_service"], "unavailable");
}

#[tokio::test]
async fn test_select_returns_ranked_shortlist() {
    let fx = fixture();
    seed_job(&fx, "J1", &[("a", 0.9), ("b", 0.75), ("c", 0.5)]);

    let (status, body) = send(&fx.router, "POST", "/api/integration/jobs/J1/select").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job_id"], "J1");
    assert_eq!(body["cached"], false);

    let candidates = body["candidates"].as_array().expect("candidates array");
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0]["candidate_id"], "a");
    assert_eq!(candidates[0]["rank"], 1);
    assert_eq!(candidates[0]["state"], "PRESELECTED");
    assert_eq!(candidates[1]["state"], "SELECTED");
    assert_eq!(candidates[2]["state"], "REVIEW");
}

#[tokio::test]
async fn test_unknown_job_is_404() {
    let fx = fixture();

    let (status, body) =
        send(&fx.router, "GET", "/api/integration/jobs/missing/shortlist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("missing")
    );
}

#[tokio::test]
async fn test_shortlist_read_is_cache_aware() {
    let fx = fixture();
    seed_job(&fx, "J1", &[("a", 0.8)]);

    let (_, first) = send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;
    assert_eq!(first["cached"], false);

    let (_, second) = send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;
    assert_eq!(second["cached"], true);

    let (status, stats) = send(&fx.router, "GET", "/api/integration/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["hit_count"], 1);
    assert_eq!(stats["miss_count"], 1);
    assert_eq!(stats["total_requests"], 2);
}

#[tokio::test]
async fn test_evict_and_clear_endpoints() {
    let fx = fixture();
    seed_job(&fx, "J1", &[("a", 0.8)]);

    send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;

    let (status, body) = send(&fx.router, "DELETE", "/api/integration/cache/J1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evicted"], true);

    let (_, again) = send(&fx.router, "DELETE", "/api/integration/cache/J1").await;
    assert_eq!(again["evicted"], false);

    send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;
    let (status, body) = send(&fx.router, "DELETE", "/api/integration/cache").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], true);

    let (_, refetched) = send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;
    assert_eq!(refetched["cached"], false);
}

#[tokio::test]
async fn test_select_recomputes_over_cache() {
    let fx = fixture();
    seed_job(&fx, "J1", &[("a", 0.8)]);

    send(&fx.router, "GET", "/api/integration/jobs/J1/shortlist").await;

    // A new stored score must show up in a forced recompute.
    fx.match_store.set_score("J1", "a", 0.95);
    let (_, body) = send(&fx.router, "POST", "/api/integration/jobs/J1/select").await;
    assert_eq!(body["cached"], false);
    assert_eq!(body["candidates"][0]["final_score"], 0.95);
}
