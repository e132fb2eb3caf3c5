//! Aggregation configuration errors.

use thiserror::Error;

/// Errors raised when an [`super::AggregationConfig`] is invalid.
///
/// These are configuration bugs and are fatal at setup; they are never
/// corrected silently.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The three component weights must sum to 1.0 (±0.001).
    #[error("score weights must sum to 1.0, got {sum}")]
    WeightsMustSumToOne { sum: f64 },

    /// Threshold must lie within [0.0, 1.0].
    #[error("threshold must be between 0.0 and 1.0, got {threshold}")]
    ThresholdOutOfRange { threshold: f64 },
}
