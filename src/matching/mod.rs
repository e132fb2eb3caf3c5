//! External match client with local degradation.
//!
//! [`Matcher`] fronts a [`MatchBackend`]: when the service is disabled by
//! configuration it goes straight to the local heuristic, and on transport
//! failure it degrades to the same heuristic if the fallback is enabled,
//! otherwise the error propagates.

pub mod client;
pub mod error;
pub mod fallback;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{DEFAULT_TIMEOUT, HttpMatchClient, MatchBackend};
pub use error::MatchError;
pub use fallback::rank_locally;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockMatchClient;
pub use model::{
    BatchMatchRequest, BatchMatchResponse, CandidatePayload, ExplainMatchRequest,
    ExplainMatchResponse, HealthResponse, HealthStatus, JobPayload, MatchBreakdown, MatchQuality,
    RankedMatch,
};

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{CandidateProfile, Job};

/// Outbound behavior of the match client.
#[derive(Debug, Clone)]
pub struct MatchClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// When false, every batch skips the service and scores locally.
    pub enabled: bool,
    /// When false, transport failures propagate instead of degrading.
    pub fallback_enabled: bool,
}

impl Default for MatchClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: DEFAULT_TIMEOUT,
            enabled: true,
            fallback_enabled: true,
        }
    }
}

/// Batch matcher with configurable degradation to the local heuristic.
pub struct Matcher {
    backend: Arc<dyn MatchBackend>,
    config: MatchClientConfig,
}

impl Matcher {
    pub fn new(backend: Arc<dyn MatchBackend>, config: MatchClientConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &MatchClientConfig {
        &self.config
    }

    /// Ranks `candidates` against `job`, degrading per configuration.
    #[tracing::instrument(skip(self, job, candidates), fields(job_id = %job.id, candidates = candidates.len()))]
    pub async fn match_batch(
        &self,
        job: &Job,
        candidates: &[CandidateProfile],
    ) -> Result<BatchMatchResponse, MatchError> {
        if !self.config.enabled {
            tracing::debug!("match service disabled, scoring locally");
            return Ok(rank_locally(job, candidates));
        }

        let request = BatchMatchRequest {
            candidates: candidates.iter().map(CandidatePayload::from_profile).collect(),
            job: JobPayload::from_job(job),
        };

        match self.backend.match_batch(&request).await {
            Ok(response) => Ok(response),
            Err(error) if self.config.fallback_enabled => {
                tracing::warn!(error = %error, "match service failed, degrading to local scorer");
                Ok(rank_locally(job, candidates))
            }
            Err(error) => Err(error),
        }
    }

    /// Advisory explanation for one pair. Unavailability yields `None`,
    /// never an error; there is no local fallback for explanations.
    pub async fn explain_match(
        &self,
        job: &Job,
        candidate: &CandidateProfile,
    ) -> Option<ExplainMatchResponse> {
        if !self.config.enabled {
            return None;
        }

        let request = ExplainMatchRequest {
            candidate: CandidatePayload::from_profile(candidate),
            job: JobPayload::from_job(job),
        };

        match self.backend.explain_match(&request).await {
            Ok(response) => Some(response),
            Err(error) => {
                tracing::debug!(
                    candidate_id = %candidate.id,
                    error = %error,
                    "explanation unavailable"
                );
                None
            }
        }
    }

    /// Reachability of the upstream service; `Unavailable` when disabled.
    pub async fn health(&self) -> HealthStatus {
        if !self.config.enabled {
            return HealthStatus::Unavailable;
        }
        self.backend.health().await
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("config", &self.config).finish()
    }
}
