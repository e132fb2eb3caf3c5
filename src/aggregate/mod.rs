//! Score aggregation: fuses AI, ATS, and profile-completeness scores into a
//! single final score under configurable weights and post-processing.
//!
//! The aggregator is the single writer of [`CandidateScore::final_score`].
//! If any component score is absent the final score is exactly `0.0` so that
//! incomplete data can never produce an inflated rank.

pub mod error;


pub use error::AggregationError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical shortlist state, derived from rank and final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateState {
    Preselected,
    Selected,
    Review,
}

/// One candidate's evaluation for one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate_id: String,
    pub candidate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_score: Option<f64>,
    /// Set only by [`ScoreAggregator::aggregate`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    /// 1-based position within the shortlist, assigned after sorting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CandidateState>,
}

impl CandidateScore {
    /// A score record with identifiers set and all components unresolved.
    pub fn new(candidate_id: impl Into<String>, candidate_name: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            candidate_name: candidate_name.into(),
            ai_score: None,
            ats_score: None,
            profile_score: None,
            final_score: None,
            rank: None,
            state: None,
        }
    }
}

/// The ranked outcome for one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortlist {
    pub job_id: String,
    /// Descending by final score; ties keep evaluation order.
    pub candidates: Vec<CandidateScore>,
    /// `true` when served from cache rather than freshly computed.
    pub cached: bool,
    /// Time of computation, not of cache retrieval.
    pub generated_at: DateTime<Utc>,
}

/// Tolerance for the weights-sum-to-one check.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Weights and post-processing policy for score aggregation.
///
/// Set at startup and treated as immutable for the run. The three weights
/// must sum to 1.0 within [`WEIGHT_TOLERANCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationConfig {
    pub ai_weight: f64,
    pub ats_weight: f64,
    pub profile_weight: f64,
    /// Clamp component scores into [0, 1] before weighting.
    pub normalize: bool,
    /// Force the result to 0.0 when the weighted sum falls below this.
    pub threshold: Option<f64>,
    /// Cap the result at 1.0.
    pub cap_at_one: bool,
    /// Round the result half-up to this many decimal places.
    pub round_to: Option<u32>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            ai_weight: 0.6,
            ats_weight: 0.3,
            profile_weight: 0.1,
            normalize: true,
            threshold: None,
            cap_at_one: true,
            round_to: Some(2),
        }
    }
}

impl AggregationConfig {
    /// Returns a config with the given weights and default post-processing.
    pub fn with_weights(ai_weight: f64, ats_weight: f64, profile_weight: f64) -> Self {
        Self {
            ai_weight,
            ats_weight,
            profile_weight,
            ..Self::default()
        }
    }

    /// Checks the weight sum and threshold range.
    pub fn validate(&self) -> Result<(), AggregationError> {
        let sum = self.ai_weight + self.ats_weight + self.profile_weight;
        // A NaN weight would slip past the tolerance check and later be
        // collapsed to 1.0 by the cap.
        if !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AggregationError::WeightsMustSumToOne { sum });
        }

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(AggregationError::ThresholdOutOfRange { threshold });
            }
        }

        Ok(())
    }
}

/// Pure, deterministic score fuser. Construction validates the config.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    config: AggregationConfig,
}

impl ScoreAggregator {
    pub fn new(config: AggregationConfig) -> Result<Self, AggregationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Fuses the three component scores into `final_score`, writing it back
    /// onto the record and returning it.
    ///
    /// Any absent component short-circuits to `0.0`.
    pub fn aggregate(&self, candidate: &mut CandidateScore) -> f64 {
        let (Some(ai), Some(ats), Some(profile)) =
            (candidate.ai_score, candidate.ats_score, candidate.profile_score)
        else {
            tracing::warn!(
                candidate_id = %candidate.candidate_id,
                "missing component score, forcing final score to 0.0"
            );
            candidate.final_score = Some(0.0);
            return 0.0;
        };

        let (ai, ats, profile) = if self.config.normalize {
            (clamp_unit(ai), clamp_unit(ats), clamp_unit(profile))
        } else {
            (ai, ats, profile)
        };

        let mut final_score = ai * self.config.ai_weight
            + ats * self.config.ats_weight
            + profile * self.config.profile_weight;

        if let Some(threshold) = self.config.threshold {
            if final_score < threshold {
                final_score = 0.0;
            }
        }

        if self.config.cap_at_one {
            final_score = final_score.min(1.0);
        }

        if let Some(places) = self.config.round_to {
            final_score = round_to_decimal_places(final_score, places);
        }

        candidate.final_score = Some(final_score);
        final_score
    }
}

/// Rounds half-up at `places` decimal places.
pub fn round_to_decimal_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}
