//! Scriptable in-memory match backend for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::MatchBackend;
use super::error::MatchError;
use super::model::{
    BatchMatchRequest, BatchMatchResponse, ExplainMatchRequest, ExplainMatchResponse,
    HealthResponse, HealthStatus, MatchQuality, RankedMatch,
};

const MOCK_DEFAULT_SCORE: f64 = 0.75;

/// Mock backend: serves scripted scores, can be switched to fail, and
/// records every batch request it sees.
#[derive(Debug, Default)]
pub struct MockMatchClient {
    failing: AtomicBool,
    calls: AtomicUsize,
    scores: Mutex<HashMap<String, f64>>,
    requests: Mutex<Vec<BatchMatchRequest>>,
}

impl MockMatchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// All subsequent calls fail with `ServiceUnavailable`.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    /// Scripts the compatibility score returned for a candidate id.
    pub fn set_score(&self, candidate_id: impl Into<String>, score: f64) {
        self.scores.lock().insert(candidate_id.into(), score);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<BatchMatchRequest> {
        self.requests.lock().clone()
    }

    fn unavailable(&self) -> MatchError {
        MatchError::ServiceUnavailable {
            url: "mock://match".to_string(),
            message: "scripted failure".to_string(),
        }
    }
}

#[async_trait]
impl MatchBackend for MockMatchClient {
    async fn match_batch(
        &self,
        request: &BatchMatchRequest,
    ) -> Result<BatchMatchResponse, MatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }

        let scores = self.scores.lock();
        let mut ranked: Vec<RankedMatch> = request
            .candidates
            .iter()
            .map(|candidate| {
                let score = scores
                    .get(&candidate.id)
                    .copied()
                    .unwrap_or(MOCK_DEFAULT_SCORE);
                RankedMatch {
                    candidate_id: candidate.id.clone(),
                    candidate_name: candidate.name.clone(),
                    rank: 0,
                    compatibility_score: score,
                    match_percentage: score * 100.0,
                    match_quality: MatchQuality::from_score(score),
                    breakdown: None,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (index, m) in ranked.iter_mut().enumerate() {
            m.rank = index as u32 + 1;
        }

        Ok(BatchMatchResponse {
            job_id: request.job.id.clone(),
            total_candidates: ranked.len(),
            ranked_candidates: ranked,
        })
    }

    async fn explain_match(
        &self,
        request: &ExplainMatchRequest,
    ) -> Result<ExplainMatchResponse, MatchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }

        let score = self
            .scores
            .lock()
            .get(&request.candidate.id)
            .copied()
            .unwrap_or(MOCK_DEFAULT_SCORE);

        Ok(ExplainMatchResponse {
            candidate_id: request.candidate.id.clone(),
            job_id: request.job.id.clone(),
            compatibility_score: score,
            match_percentage: score * 100.0,
            breakdown: None,
            strengths: vec!["scripted strength".to_string()],
            weaknesses: vec![],
            suggestions: vec![],
            decision_recommendation: None,
        })
    }

    async fn health(&self) -> HealthStatus {
        if self.failing.load(Ordering::SeqCst) {
            HealthStatus::Unavailable
        } else {
            HealthStatus::Available(HealthResponse {
                status: "ok".to_string(),
                model_loaded: true,
                cold_start_seconds: None,
            })
        }
    }
}
