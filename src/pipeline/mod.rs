//! Shortlist generation: fetch, evaluate, aggregate, rank, cache.
//!
//! [`ShortlistPipeline`] runs the per-job state machine: fetch the job and
//! its candidates, resolve the three component scores for each candidate,
//! aggregate, stable-sort descending, assign ranks and states, and write
//! the result to the cache. `get_shortlist` is the cache-aware read path.

pub mod error;
pub mod provider;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use provider::{
    CandidateProvider, InMemoryDirectory, InMemoryMatchStore, JobProvider, MatchRecordStore,
    ProviderError,
};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::aggregate::{CandidateScore, CandidateState, ScoreAggregator, Shortlist};
use crate::cache::ShortlistCacheService;
use crate::domain::CandidateProfile;
use crate::evaluator::ProfileEvaluator;
use crate::matching::Matcher;

/// AI score used when neither a stored match nor a service result exists.
pub const DEFAULT_AI_SCORE: f64 = 0.65;

const PRESELECT_MIN_SCORE: f64 = 0.8;
const SELECT_MIN_SCORE: f64 = 0.7;
const SELECT_MAX_RANK: u32 = 3;

/// Orchestrates shortlist generation for one job at a time.
pub struct ShortlistPipeline {
    jobs: Arc<dyn JobProvider>,
    candidates: Arc<dyn CandidateProvider>,
    match_records: Arc<dyn MatchRecordStore>,
    evaluator: Arc<ProfileEvaluator>,
    aggregator: ScoreAggregator,
    matcher: Arc<Matcher>,
    cache: Arc<ShortlistCacheService>,
}

impl ShortlistPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        jobs: Arc<dyn JobProvider>,
        candidates: Arc<dyn CandidateProvider>,
        match_records: Arc<dyn MatchRecordStore>,
        evaluator: Arc<ProfileEvaluator>,
        aggregator: ScoreAggregator,
        matcher: Arc<Matcher>,
        cache: Arc<ShortlistCacheService>,
    ) -> Self {
        Self {
            jobs,
            candidates,
            match_records,
            evaluator,
            aggregator,
            matcher,
            cache,
        }
    }

    pub fn evaluator(&self) -> &ProfileEvaluator {
        &self.evaluator
    }

    /// Cache-aware read path: a cached shortlist is returned with
    /// `cached = true`; otherwise a fresh one is generated and cached.
    pub async fn get_shortlist(&self, job_id: &str) -> Result<Arc<Shortlist>, PipelineError> {
        if let Some(cached) = self.cache.get(job_id) {
            let mut shortlist = (*cached).clone();
            shortlist.cached = true;
            return Ok(Arc::new(shortlist));
        }
        self.generate_shortlist(job_id).await
    }

    /// Generates a fresh shortlist and replaces any cached one.
    #[tracing::instrument(skip(self))]
    pub async fn generate_shortlist(&self, job_id: &str) -> Result<Arc<Shortlist>, PipelineError> {
        let job = self
            .jobs
            .job(job_id)
            .await?
            .ok_or_else(|| PipelineError::JobNotFound {
                job_id: job_id.to_string(),
            })?;
        let candidates = self.candidates.candidates_for_job(job_id).await?;

        // Stored match scores first; one batch call covers the rest.
        let mut stored: HashMap<String, f64> = HashMap::with_capacity(candidates.len());
        for candidate in &candidates {
            if let Some(score) = self.match_records.stored_score(job_id, &candidate.id).await? {
                stored.insert(candidate.id.clone(), score);
            }
        }

        let fresh = if stored.len() < candidates.len() {
            self.fetch_fresh_scores(&job, &candidates).await?
        } else {
            HashMap::new()
        };

        let mut scored: Vec<CandidateScore> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match self.evaluate_candidate(candidate, &stored, &fresh) {
                Some(score) => scored.push(score),
                None => {
                    tracing::warn!(
                        job_id,
                        candidate_id = %candidate.id,
                        "candidate dropped from shortlist"
                    );
                }
            }
        }

        // Stable sort keeps evaluation order on ties.
        scored.sort_by(|a, b| {
            let a_score = a.final_score.unwrap_or(0.0);
            let b_score = b.final_score.unwrap_or(0.0);
            b_score.partial_cmp(&a_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        assign_ranks_and_states(&mut scored);

        let shortlist = Arc::new(Shortlist {
            job_id: job_id.to_string(),
            candidates: scored,
            cached: false,
            generated_at: Utc::now(),
        });

        self.cache.put(job_id, shortlist.clone());
        tracing::info!(
            job_id,
            candidates = shortlist.candidates.len(),
            strategy = self.evaluator.strategy_name(),
            "shortlist generated"
        );
        Ok(shortlist)
    }

    /// One batch call for candidates without stored scores. The results are
    /// persisted on a detached task; its failure is logged, never surfaced.
    async fn fetch_fresh_scores(
        &self,
        job: &crate::domain::Job,
        candidates: &[CandidateProfile],
    ) -> Result<HashMap<String, f64>, PipelineError> {
        let response = self.matcher.match_batch(job, candidates).await?;

        let scores: Vec<(String, f64)> = response
            .ranked_candidates
            .iter()
            .map(|m| (m.candidate_id.clone(), m.compatibility_score))
            .collect();

        let records = self.match_records.clone();
        let job_id = job.id.clone();
        let to_persist = scores.clone();
        tokio::spawn(async move {
            if let Err(error) = records.store_scores(&job_id, &to_persist).await {
                tracing::error!(job_id, error = %error, "failed to persist match scores");
            }
        });

        Ok(scores.into_iter().collect())
    }

    /// Resolves the three component scores and aggregates. Returns `None`
    /// when the candidate must be dropped (corrupt stored score).
    fn evaluate_candidate(
        &self,
        candidate: &CandidateProfile,
        stored: &HashMap<String, f64>,
        fresh: &HashMap<String, f64>,
    ) -> Option<CandidateScore> {
        let ai_score = match stored.get(&candidate.id) {
            Some(score) if !score.is_finite() => {
                tracing::warn!(
                    candidate_id = %candidate.id,
                    stored_score = %score,
                    "stored match score is not finite"
                );
                return None;
            }
            Some(score) => *score,
            None => fresh.get(&candidate.id).copied().unwrap_or(DEFAULT_AI_SCORE),
        };

        let ats_score = self.evaluator.evaluate(candidate);
        let profile_score = profile_completeness_score(candidate);

        let mut score = CandidateScore::new(candidate.id.clone(), candidate.name.clone());
        score.ai_score = Some(ai_score);
        score.ats_score = Some(ats_score);
        score.profile_score = Some(profile_score);
        self.aggregator.aggregate(&mut score);
        Some(score)
    }
}

impl std::fmt::Debug for ShortlistPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortlistPipeline")
            .field("aggregator", self.aggregator.config())
            .finish()
    }
}

/// Completeness component: 1.0 for a profile the provider marked complete,
/// 0.5 for partial data, 0.0 for an empty profile.
fn profile_completeness_score(candidate: &CandidateProfile) -> f64 {
    if candidate.complete {
        1.0
    } else if !candidate.skills.is_empty()
        || !candidate.experience.is_empty()
        || !candidate.education.is_empty()
    {
        0.5
    } else {
        0.0
    }
}

/// Ranks are 1-based positions after the sort. The state rule is a total
/// function of (rank, final score): rank 1 at ≥ 0.8 is preselected, ranks
/// 1-3 at ≥ 0.7 are selected, everything else goes to review.
fn assign_ranks_and_states(candidates: &mut [CandidateScore]) {
    for (index, candidate) in candidates.iter_mut().enumerate() {
        let rank = index as u32 + 1;
        let score = candidate.final_score.unwrap_or(0.0);
        candidate.rank = Some(rank);
        candidate.state = Some(if rank == 1 && score >= PRESELECT_MIN_SCORE {
            CandidateState::Preselected
        } else if rank <= SELECT_MAX_RANK && score >= SELECT_MIN_SCORE {
            CandidateState::Selected
        } else {
            CandidateState::Review
        });
    }
}
