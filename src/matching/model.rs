//! Wire types for the external match service contract.
//!
//! Field names follow the service's JSON (`candidate_id`,
//! `compatibility_score`, ...). The request side is built from the domain
//! records supplied by the data provider.

use serde::{Deserialize, Serialize};

use crate::domain::{CandidateProfile, Job};

/// Candidate payload sent to `POST /api/match/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub experience_years: u32,
}

impl CandidatePayload {
    pub fn from_profile(profile: &CandidateProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            summary: profile.summary.clone(),
            location: profile.location.clone(),
            skills: profile.skills.iter().map(|s| s.name.clone()).collect(),
            languages: profile
                .languages
                .iter()
                .map(|lang| format!("{} ({})", lang.name, lang.level))
                .collect(),
            experience_years: profile.total_experience_years(),
        }
    }
}

/// Job payload sent alongside the candidate batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
}

impl JobPayload {
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            skills: job.skills.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMatchRequest {
    pub candidates: Vec<CandidatePayload>,
    pub job: JobPayload,
}

/// Categorical label returned alongside the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    /// Label for a compatibility score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.85 => Self::Excellent,
            s if s >= 0.7 => Self::Good,
            s if s >= 0.5 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Per-dimension breakdown attached to a ranked result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f64>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
}

/// One ranked candidate in a batch response. Rank 1 is the best match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub candidate_id: String,
    pub candidate_name: String,
    pub rank: u32,
    pub compatibility_score: f64,
    pub match_percentage: f64,
    pub match_quality: MatchQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<MatchBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMatchResponse {
    pub job_id: String,
    pub ranked_candidates: Vec<RankedMatch>,
    pub total_candidates: usize,
}

impl BatchMatchResponse {
    /// Compatibility score for one candidate, if ranked.
    pub fn score_for(&self, candidate_id: &str) -> Option<f64> {
        self.ranked_candidates
            .iter()
            .find(|m| m.candidate_id == candidate_id)
            .map(|m| m.compatibility_score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainMatchRequest {
    pub candidate: CandidatePayload,
    pub job: JobPayload,
}

/// Advisory explanation of a single match. No local fallback exists for
/// this; callers receive `None` when the service is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainMatchResponse {
    pub candidate_id: String,
    pub job_id: String,
    pub compatibility_score: f64,
    pub match_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<MatchBreakdown>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_recommendation: Option<String>,
}

/// Payload of the service's `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold_start_seconds: Option<f64>,
}

/// Reachability of the match service as seen by this process.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Available(HealthResponse),
    /// Any transport or decode error collapses to this; never fatal.
    Unavailable,
}

impl HealthStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}
