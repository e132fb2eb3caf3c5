//! Data-provider seams for jobs, candidates, and persisted match scores.
//!
//! The pipeline depends on these traits; production deployments back them
//! with the ATS database, the in-memory implementations here serve tests
//! and the demo binary.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use crate::domain::{CandidateProfile, Job};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("data provider unavailable: {message}")]
    Unavailable { message: String },
}

/// Supplies job records.
#[async_trait]
pub trait JobProvider: Send + Sync {
    async fn job(&self, job_id: &str) -> Result<Option<Job>, ProviderError>;
}

/// Supplies the candidates applying to a job.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    async fn candidates_for_job(&self, job_id: &str)
    -> Result<Vec<CandidateProfile>, ProviderError>;
}

/// Persisted compatibility scores from earlier match runs.
#[async_trait]
pub trait MatchRecordStore: Send + Sync {
    /// Stored score for one (job, candidate) pair, if any.
    async fn stored_score(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<Option<f64>, ProviderError>;

    /// Upserts fresh scores for a job. Last write wins per pair.
    async fn store_scores(
        &self,
        job_id: &str,
        scores: &[(String, f64)],
    ) -> Result<(), ProviderError>;
}

/// In-memory job/candidate directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    jobs: RwLock<HashMap<String, Job>>,
    candidates: RwLock<HashMap<String, Vec<CandidateProfile>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_job(&self, job: Job) {
        self.jobs.write().insert(job.id.clone(), job);
    }

    pub fn insert_candidates(&self, job_id: &str, candidates: Vec<CandidateProfile>) {
        self.candidates.write().insert(job_id.to_string(), candidates);
    }
}

#[async_trait]
impl JobProvider for InMemoryDirectory {
    async fn job(&self, job_id: &str) -> Result<Option<Job>, ProviderError> {
        Ok(self.jobs.read().get(job_id).cloned())
    }
}

#[async_trait]
impl CandidateProvider for InMemoryDirectory {
    async fn candidates_for_job(
        &self,
        job_id: &str,
    ) -> Result<Vec<CandidateProfile>, ProviderError> {
        Ok(self.candidates.read().get(job_id).cloned().unwrap_or_default())
    }
}

/// In-memory match-score store keyed by (job, candidate).
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    scores: RwLock<HashMap<(String, String), f64>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_score(&self, job_id: &str, candidate_id: &str, score: f64) {
        self.scores
            .write()
            .insert((job_id.to_string(), candidate_id.to_string()), score);
    }
}

#[async_trait]
impl MatchRecordStore for InMemoryMatchStore {
    async fn stored_score(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<Option<f64>, ProviderError> {
        Ok(self
            .scores
            .read()
            .get(&(job_id.to_string(), candidate_id.to_string()))
            .copied())
    }

    async fn store_scores(
        &self,
        job_id: &str,
        scores: &[(String, f64)],
    ) -> Result<(), ProviderError> {
        let mut map = self.scores.write();
        for (candidate_id, score) in scores {
            map.insert((job_id.to_string(), candidate_id.clone()), *score);
        }
        Ok(())
    }
}
