use std::sync::Arc;
use std::time::Duration;

use crate::aggregate::{AggregationConfig, CandidateState, ScoreAggregator};
use crate::cache::{CacheConfig, ShortlistCacheService};
use crate::domain::{CandidateProfile, Job};
use crate::evaluator::ProfileEvaluator;
use crate::matching::{MatchClientConfig, Matcher, MockMatchClient};

use super::provider::{InMemoryDirectory, InMemoryMatchStore, MatchRecordStore};
use super::{PipelineError, ShortlistPipeline};

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

struct TestBed {
    pipeline: ShortlistPipeline,
    directory: Arc<InMemoryDirectory>,
    match_store: Arc<InMemoryMatchStore>,
    backend: Arc<MockMatchClient>,
    cache: Arc<ShortlistCacheService>,
}

/// Pipeline wired so `final_score == ai_score`: the aggregator puts all
/// weight on the AI component, which tests script via the match store.
fn testbed(match_config: MatchClientConfig) -> TestBed {
    let directory = Arc::new(InMemoryDirectory::new());
    let match_store = Arc::new(InMemoryMatchStore::new());
    let backend = Arc::new(MockMatchClient::new());
    let cache = Arc::new(ShortlistCacheService::new(CacheConfig {
        ttl: Duration::from_secs(60),
        ..CacheConfig::default()
    }));

    let aggregator = ScoreAggregator::new(AggregationConfig::with_weights(1.0, 0.0, 0.0))
        .expect("valid weights");

    let pipeline = ShortlistPipeline::new(
        directory.clone(),
        directory.clone(),
        match_store.clone(),
        Arc::new(ProfileEvaluator::new()),
        aggregator,
        Arc::new(Matcher::new(backend.clone(), match_config)),
        cache.clone(),
    );

    TestBed {
        pipeline,
        directory,
        match_store,
        backend,
        cache,
    }
}

#[tokio::test]
async fn test_unknown_job_is_fatal() {
    let bed = testbed(MatchClientConfig::default());

    let err = bed
        .pipeline
        .generate_shortlist("missing")
        .await
        .expect_err("unknown job");
    assert!(matches!(err, PipelineError::JobNotFound { .. }));
}

#[tokio::test]
async fn test_end_to_end_ranks_and_states() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory
        .insert_candidates("J1", vec![candidate("a"), candidate("b"), candidate("c")]);
    bed.match_store.set_score("J1", "a", 0.9);
    bed.match_store.set_score("J1", "b", 0.75);
    bed.match_store.set_score("J1", "c", 0.5);

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");

    let ids: Vec<&str> = shortlist
        .candidates
        .iter()
        .map(|c| c.candidate_id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let ranks: Vec<u32> = shortlist.candidates.iter().filter_map(|c| c.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    let states: Vec<CandidateState> =
        shortlist.candidates.iter().filter_map(|c| c.state).collect();
    assert_eq!(
        states,
        vec![
            CandidateState::Preselected,
            CandidateState::Selected,
            CandidateState::Review,
        ]
    );
    assert!(!shortlist.cached);
}

#[tokio::test]
async fn test_state_rule_is_rank_gated() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory.insert_candidates(
        "J1",
        vec![
            candidate("c1"),
            candidate("c2"),
            candidate("c3"),
            candidate("c4"),
            candidate("c5"),
        ],
    );
    for (id, score) in [("c1", 0.99), ("c2", 0.98), ("c3", 0.97), ("c4", 0.96), ("c5", 0.9)] {
        bed.match_store.set_score("J1", id, score);
    }

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");
    let states: Vec<CandidateState> =
        shortlist.candidates.iter().filter_map(|c| c.state).collect();

    // A 0.9 score past rank 3 still lands in review.
    assert_eq!(
        states,
        vec![
            CandidateState::Preselected,
            CandidateState::Selected,
            CandidateState::Selected,
            CandidateState::Review,
            CandidateState::Review,
        ]
    );
}

#[tokio::test]
async fn test_ranks_are_contiguous_and_scores_non_increasing() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    let candidates: Vec<CandidateProfile> =
        (0..8).map(|i| candidate(&format!("c{i}"))).collect();
    bed.directory.insert_candidates("J1", candidates);
    for (i, score) in [0.3, 0.9, 0.1, 0.7, 0.7, 0.55, 0.8, 0.2].iter().enumerate() {
        bed.match_store.set_score("J1", &format!("c{i}"), *score);
    }

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");

    let ranks: Vec<u32> = shortlist.candidates.iter().filter_map(|c| c.rank).collect();
    assert_eq!(ranks, (1..=8).collect::<Vec<u32>>());

    let scores: Vec<f64> = shortlist
        .candidates
        .iter()
        .filter_map(|c| c.final_score)
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

    // 0.7 tie keeps evaluation order: c3 before c4.
    let tied: Vec<&str> = shortlist
        .candidates
        .iter()
        .filter(|c| c.final_score == Some(0.7))
        .map(|c| c.candidate_id.as_str())
        .collect();
    assert_eq!(tied, vec!["c3", "c4"]);
}

#[tokio::test]
async fn test_get_shortlist_serves_cache_with_flag() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory.insert_candidates("J1", vec![candidate("a")]);
    bed.match_store.set_score("J1", "a", 0.8);

    let fresh = bed.pipeline.get_shortlist("J1").await.expect("fresh");
    assert!(!fresh.cached);

    let cached = bed.pipeline.get_shortlist("J1").await.expect("cached");
    assert!(cached.cached);
    assert_eq!(cached.candidates.len(), 1);

    bed.cache.evict("J1");
    let regenerated = bed.pipeline.get_shortlist("J1").await.expect("regenerated");
    assert!(!regenerated.cached);
}

#[tokio::test]
async fn test_corrupt_stored_score_drops_only_that_candidate() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory
        .insert_candidates("J1", vec![candidate("good"), candidate("bad")]);
    bed.match_store.set_score("J1", "good", 0.8);
    bed.match_store.set_score("J1", "bad", f64::NAN);

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");

    assert_eq!(shortlist.candidates.len(), 1);
    assert_eq!(shortlist.candidates[0].candidate_id, "good");
    assert_eq!(shortlist.candidates[0].rank, Some(1));
}

#[tokio::test]
async fn test_fresh_scores_are_persisted_in_background() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory.insert_candidates("J1", vec![candidate("a")]);
    bed.backend.set_score("a", 0.82);

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");
    assert_eq!(shortlist.candidates[0].final_score, Some(0.82));

    // Persistence is detached; give the task a moment to run.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let stored = bed
        .match_store
        .stored_score("J1", "a")
        .await
        .expect("store read");
    assert_eq!(stored, Some(0.82));
    assert_eq!(bed.backend.call_count(), 1);
}

#[tokio::test]
async fn test_stored_scores_skip_the_match_service() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));
    bed.directory.insert_candidates("J1", vec![candidate("a")]);
    bed.match_store.set_score("J1", "a", 0.77);

    bed.pipeline.generate_shortlist("J1").await.expect("shortlist");
    assert_eq!(bed.backend.call_count(), 0);
}

#[tokio::test]
async fn test_match_failure_without_fallback_aborts_generation() {
    let bed = testbed(MatchClientConfig {
        fallback_enabled: false,
        ..MatchClientConfig::default()
    });
    bed.directory.insert_job(job("J1"));
    bed.directory.insert_candidates("J1", vec![candidate("a")]);
    bed.backend.fail();

    let err = bed
        .pipeline
        .generate_shortlist("J1")
        .await
        .expect_err("no fallback");
    assert!(matches!(err, PipelineError::Match(_)));
}

#[tokio::test]
async fn test_empty_candidate_list_yields_empty_shortlist() {
    let bed = testbed(MatchClientConfig::default());
    bed.directory.insert_job(job("J1"));

    let shortlist = bed.pipeline.generate_shortlist("J1").await.expect("shortlist");
    assert!(shortlist.candidates.is_empty());
    assert_eq!(bed.backend.call_count(), 0);
}
