//! Local heuristic scorer used when the external service is disabled or
//! unreachable.
//!
//! `score = 0.6 * skill_overlap + 0.4 * experience_adequacy`, capped at 1.0.
//! Skill overlap is the fraction of the job's listed skills the candidate
//! has (0.5 when the job lists none); experience adequacy is 0.8 when the
//! candidate meets the job's minimum years, 0.4 otherwise.

use crate::domain::{CandidateProfile, Job};

use super::model::{BatchMatchResponse, MatchBreakdown, MatchQuality, RankedMatch};

const SKILL_WEIGHT: f64 = 0.6;
const EXPERIENCE_WEIGHT: f64 = 0.4;
const NO_LISTED_SKILLS_OVERLAP: f64 = 0.5;
const ADEQUATE_EXPERIENCE: f64 = 0.8;
const INADEQUATE_EXPERIENCE: f64 = 0.4;

/// Ranks candidates locally, stable on score ties, 1-based ranks.
pub fn rank_locally(job: &Job, candidates: &[CandidateProfile]) -> BatchMatchResponse {
    let mut scored: Vec<RankedMatch> = candidates
        .iter()
        .map(|candidate| score_candidate(job, candidate))
        .collect();

    scored.sort_by(|a, b| {
        b.compatibility_score
            .partial_cmp(&a.compatibility_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (index, m) in scored.iter_mut().enumerate() {
        m.rank = index as u32 + 1;
    }

    BatchMatchResponse {
        job_id: job.id.clone(),
        total_candidates: scored.len(),
        ranked_candidates: scored,
    }
}

fn score_candidate(job: &Job, candidate: &CandidateProfile) -> RankedMatch {
    let candidate_skills = candidate.skill_names_lowercase();

    let (overlap, matched, missing) = if job.skills.is_empty() {
        (NO_LISTED_SKILLS_OVERLAP, vec![], vec![])
    } else {
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        for skill in &job.skills {
            if candidate_skills.contains(&skill.to_lowercase()) {
                matched.push(skill.clone());
            } else {
                missing.push(skill.clone());
            }
        }
        let ratio = matched.len() as f64 / job.skills.len() as f64;
        (ratio, matched, missing)
    };

    let adequacy = if candidate.total_experience_years() >= job.min_experience_years {
        ADEQUATE_EXPERIENCE
    } else {
        INADEQUATE_EXPERIENCE
    };

    let score = (SKILL_WEIGHT * overlap + EXPERIENCE_WEIGHT * adequacy).min(1.0);

    RankedMatch {
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.name.clone(),
        rank: 0, // assigned after sorting
        compatibility_score: score,
        match_percentage: score * 100.0,
        match_quality: MatchQuality::from_score(score),
        breakdown: Some(MatchBreakdown {
            skills_score: Some(overlap),
            experience_score: Some(adequacy),
            matched_skills: matched,
            missing_skills: missing,
            explanation: Some("scored by local heuristic (match service unavailable)".to_string()),
            ..MatchBreakdown::default()
        }),
    }
}
