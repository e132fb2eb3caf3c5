//! Error types for shortlist generation.

use thiserror::Error;

use crate::matching::MatchError;

use super::provider::ProviderError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unknown job id. Fatal to the call, no retry.
    #[error("job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("data provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Match service failure with fallback disabled.
    #[error("match service error: {0}")]
    Match(#[from] MatchError),
}
