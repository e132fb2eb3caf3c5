//! ATS profile evaluation.
//!
//! A profile is scored by a pluggable [`EvaluationStrategy`]; the three
//! shipped strategies (strict, balanced, lenient) weight the same
//! sub-scores differently and apply different floors. The process-wide
//! current strategy lives behind an atomic swap so that concurrent
//! replacement never corrupts an in-flight evaluation.

pub mod strategy;

#[cfg(test)]
mod tests;

pub use strategy::{Balanced, EvaluationStrategy, Lenient, Strict};

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::CandidateProfile;

/// Evaluates profiles with a swappable current strategy (default balanced).
pub struct ProfileEvaluator {
    strategy: RwLock<Arc<dyn EvaluationStrategy>>,
}

impl ProfileEvaluator {
    pub fn new() -> Self {
        Self::with_strategy(Arc::new(Balanced))
    }

    pub fn with_strategy(strategy: Arc<dyn EvaluationStrategy>) -> Self {
        Self {
            strategy: RwLock::new(strategy),
        }
    }

    /// Scores a profile with the current strategy.
    ///
    /// The strategy reference is read once per call; a concurrent
    /// [`set_strategy`](Self::set_strategy) does not affect an evaluation
    /// already underway.
    pub fn evaluate(&self, profile: &CandidateProfile) -> f64 {
        let strategy = Arc::clone(&self.strategy.read());
        let score = strategy.evaluate(profile);
        tracing::debug!(
            candidate_id = %profile.id,
            strategy = strategy.name(),
            score,
            "evaluated ATS profile"
        );
        score
    }

    /// Replaces the current strategy. Last write wins.
    pub fn set_strategy(&self, strategy: Arc<dyn EvaluationStrategy>) {
        tracing::info!(strategy = strategy.name(), "evaluation strategy replaced");
        *self.strategy.write() = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.read().name()
    }
}

impl Default for ProfileEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProfileEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEvaluator")
            .field("strategy", &self.strategy_name())
            .finish()
    }
}

/// Fraction of `required` skills present on the profile, matched
/// case-insensitively. Empty inputs yield `0.0`.
pub fn evaluate_skills_match(profile: &CandidateProfile, required: &[String]) -> f64 {
    if profile.skills.is_empty() || required.is_empty() {
        return 0.0;
    }

    let profile_skills = profile.skill_names_lowercase();
    let matches = required
        .iter()
        .filter(|skill| profile_skills.contains(&skill.to_lowercase()))
        .count();

    matches as f64 / required.len() as f64
}
