//! The strict / balanced / lenient evaluation strategies.
//!
//! Every strategy combines the same sub-scores (skills, experience,
//! education, and for the softer two, profile completeness) under weights
//! summing to 1.0, capping the total at 1.0. The numeric tables are the
//! product behavior and are asserted by the module tests.

use crate::domain::{CandidateProfile, Experience, SkillLevel};

/// A profile scoring policy. Implementations must be pure.
pub trait EvaluationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Scores a profile into [0.0, 1.0].
    fn evaluate(&self, profile: &CandidateProfile) -> f64;
}

/// High requirements: no floors, steep experience thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

/// Moderate requirements with nonzero floors. The default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Balanced;

/// Low requirements: flat base scores with small bonuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

impl EvaluationStrategy for Strict {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn evaluate(&self, profile: &CandidateProfile) -> f64 {
        let score = self.skills(profile) * 0.4
            + self.experience(profile) * 0.4
            + self.education(profile) * 0.2;
        score.min(1.0)
    }
}

impl Strict {
    fn skills(&self, profile: &CandidateProfile) -> f64 {
        if profile.skills.is_empty() {
            return 0.0;
        }
        weighted_skill_score(profile, 1.0, 0.7, 0.4).max(0.0)
    }

    fn experience(&self, profile: &CandidateProfile) -> f64 {
        if profile.experience.is_empty() {
            return 0.0;
        }

        let years: f64 = profile
            .experience
            .iter()
            .map(|exp| estimated_years(exp, [10.0, 7.0, 4.0, 2.0]))
            .sum();

        match years {
            y if y >= 10.0 => 1.0,
            y if y >= 7.0 => 0.8,
            y if y >= 5.0 => 0.6,
            y if y >= 3.0 => 0.4,
            y if y >= 1.0 => 0.2,
            _ => 0.0,
        }
    }

    fn education(&self, profile: &CandidateProfile) -> f64 {
        match highest_degree(profile) {
            Some(DegreeTier::Doctorate) => 1.0,
            Some(DegreeTier::Master) => 0.8,
            Some(DegreeTier::Bachelor) => 0.6,
            None => 0.0,
        }
    }
}

impl EvaluationStrategy for Balanced {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn evaluate(&self, profile: &CandidateProfile) -> f64 {
        let score = self.skills(profile) * 0.35
            + self.experience(profile) * 0.35
            + self.education(profile) * 0.2
            + completeness_fraction(profile) * 0.1;
        score.min(1.0)
    }
}

impl Balanced {
    fn skills(&self, profile: &CandidateProfile) -> f64 {
        if profile.skills.is_empty() {
            return 0.3;
        }
        weighted_skill_score(profile, 1.0, 0.8, 0.5).max(0.3)
    }

    fn experience(&self, profile: &CandidateProfile) -> f64 {
        if profile.experience.is_empty() {
            return 0.3;
        }

        let years: f64 = profile
            .experience
            .iter()
            .map(|exp| estimated_years(exp, [8.0, 5.0, 3.0, 1.5]))
            .sum();

        match years {
            y if y >= 10.0 => 1.0,
            y if y >= 5.0 => 0.8,
            y if y >= 2.0 => 0.6,
            y if y >= 1.0 => 0.4,
            _ => 0.3,
        }
    }

    fn education(&self, profile: &CandidateProfile) -> f64 {
        match highest_degree(profile) {
            Some(DegreeTier::Doctorate) => 1.0,
            Some(DegreeTier::Master) => 0.8,
            Some(DegreeTier::Bachelor) => 0.6,
            None => 0.5,
        }
    }
}

impl EvaluationStrategy for Lenient {
    fn name(&self) -> &'static str {
        "lenient"
    }

    fn evaluate(&self, profile: &CandidateProfile) -> f64 {
        let score = self.skills(profile) * 0.3
            + self.experience(profile) * 0.3
            + self.education(profile) * 0.2
            + self.completeness(profile) * 0.2;
        score.min(1.0)
    }
}

impl Lenient {
    fn skills(&self, profile: &CandidateProfile) -> f64 {
        if profile.skills.is_empty() {
            return 0.5;
        }

        let mut base: f64 = 0.6;
        if profile.skills.len() >= 5 {
            base += 0.2;
        }
        base.min(1.0)
    }

    fn experience(&self, profile: &CandidateProfile) -> f64 {
        if profile.experience.is_empty() {
            return 0.6;
        }

        let mut base: f64 = 0.7;
        if profile.experience.len() >= 3 {
            base += 0.2;
        }
        base.min(1.0)
    }

    fn education(&self, profile: &CandidateProfile) -> f64 {
        if profile.education.is_empty() { 0.7 } else { 0.8 }
    }

    fn completeness(&self, profile: &CandidateProfile) -> f64 {
        // Coarser step function than the balanced fraction.
        match complete_sections(profile) {
            n if n >= 2 => 0.8,
            1 => 0.5,
            _ => 0.3,
        }
    }
}

enum DegreeTier {
    Doctorate,
    Master,
    Bachelor,
}

/// Highest degree on the profile; case-insensitive exact match.
fn highest_degree(profile: &CandidateProfile) -> Option<DegreeTier> {
    let has = |names: &[&str]| {
        profile
            .education
            .iter()
            .any(|edu| names.iter().any(|n| edu.degree.eq_ignore_ascii_case(n)))
    };

    if has(&["PhD", "Doctorate"]) {
        Some(DegreeTier::Doctorate)
    } else if has(&["Master"]) {
        Some(DegreeTier::Master)
    } else if has(&["Bachelor"]) {
        Some(DegreeTier::Bachelor)
    } else {
        None
    }
}

/// Per-level weighted skill average: `Σ(level_weight) / skill_count`.
/// Beginner skills carry no weight.
fn weighted_skill_score(profile: &CandidateProfile, expert: f64, advanced: f64, intermediate: f64) -> f64 {
    let total: f64 = profile
        .skills
        .iter()
        .map(|skill| match skill.level {
            SkillLevel::Expert => expert,
            SkillLevel::Advanced => advanced,
            SkillLevel::Intermediate => intermediate,
            SkillLevel::Beginner => 0.0,
        })
        .sum();

    total / profile.skills.len() as f64
}

/// Estimates the years one entry represents from seniority keywords in its
/// position and description. `tiers` is [director/vp, senior/lead,
/// mid/level, base].
fn estimated_years(exp: &Experience, tiers: [f64; 4]) -> f64 {
    let haystack = format!(
        "{} {}",
        exp.position.to_lowercase(),
        exp.description.to_lowercase()
    );

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));

    if contains_any(&["director", "vp"]) {
        tiers[0]
    } else if contains_any(&["senior", "lead"]) {
        tiers[1]
    } else if contains_any(&["mid", "level"]) {
        tiers[2]
    } else {
        tiers[3]
    }
}

fn complete_sections(profile: &CandidateProfile) -> u32 {
    let has_summary = profile
        .summary
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());

    [
        has_summary,
        !profile.skills.is_empty(),
        !profile.experience.is_empty(),
        !profile.education.is_empty(),
    ]
    .iter()
    .filter(|present| **present)
    .count() as u32
}

/// Fraction of the four profile sections present, out of 4.
fn completeness_fraction(profile: &CandidateProfile) -> f64 {
    complete_sections(profile) as f64 / 4.0
}
