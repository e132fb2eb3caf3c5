use std::sync::Arc;

use crate::domain::{CandidateProfile, Education, Experience, Skill, SkillLevel};

use super::strategy::{Balanced, EvaluationStrategy, Lenient, Strict};
use super::{ProfileEvaluator, evaluate_skills_match};

fn empty_profile() -> CandidateProfile {
    CandidateProfile {
        id: "c1".to_string(),
        name: "Ada Lovelace".to_string(),
        email: String::new(),
        summary: None,
        location: None,
        skills: vec![],
        experience: vec![],
        education: vec![],
        languages: vec![],
        complete: false,
    }
}

fn experience(position: &str, description: &str) -> Experience {
    Experience {
        company: "Acme".to_string(),
        position: position.to_string(),
        description: description.to_string(),
        start_date: None,
        end_date: None,
    }
}

fn education(degree: &str) -> Education {
    Education {
        institution: "MIT".to_string(),
        degree: degree.to_string(),
        field: "CS".to_string(),
        start_date: None,
        end_date: None,
    }
}

fn strong_profile() -> CandidateProfile {
    let mut profile = empty_profile();
    profile.summary = Some("Seasoned engineer".to_string());
    profile.skills = vec![
        Skill::new("Rust", SkillLevel::Expert),
        Skill::new("Go", SkillLevel::Expert),
        Skill::new("SQL", SkillLevel::Advanced),
    ];
    profile.experience = vec![
        experience("Director of Engineering", "ran the platform org"),
        experience("Senior Engineer", "backend services"),
    ];
    profile.education = vec![education("PhD")];
    profile
}

#[test]
fn test_strict_empty_profile_scores_zero() {
    assert_eq!(Strict.evaluate(&empty_profile()), 0.0);
}

#[test]
fn test_strict_strong_profile() {
    let profile = strong_profile();
    // skills (1.0 + 1.0 + 0.7) / 3 = 0.9; experience 10 + 7 years -> 1.0;
    // education PhD -> 1.0. 0.9*0.4 + 1.0*0.4 + 1.0*0.2 = 0.96.
    let score = Strict.evaluate(&profile);
    assert!((score - 0.96).abs() < 1e-9);
}

#[test]
fn test_strict_experience_steps() {
    let mut profile = empty_profile();
    profile.experience = vec![experience("Engineer", "wrote code")]; // base tier, 2 years
    profile.skills = vec![Skill::new("Rust", SkillLevel::Expert)];

    // skills 1.0 * 0.4 + experience 0.2 (>=1y) * 0.4 + education 0.0
    let score = Strict.evaluate(&profile);
    assert!((score - 0.48).abs() < 1e-9);
}

#[test]
fn test_balanced_floors_apply() {
    // An entirely empty profile still gets the configured floors:
    // skills 0.3*0.35 + experience 0.3*0.35 + education 0.5*0.2 + completeness 0.
    let score = Balanced.evaluate(&empty_profile());
    assert!((score - 0.31).abs() < 1e-9);
}

#[test]
fn test_balanced_low_skill_profile_hits_floor() {
    let mut profile = empty_profile();
    profile.skills = vec![
        Skill::new("Excel", SkillLevel::Beginner),
        Skill::new("Word", SkillLevel::Beginner),
    ];

    // Weighted skill average is 0.0 but the balanced floor lifts it to 0.3.
    let skills_only = Balanced.evaluate(&profile);
    let floor_only = Balanced.evaluate(&empty_profile());
    // One section present adds 0.25 completeness over the empty profile.
    assert!((skills_only - (floor_only + 0.25 * 0.1)).abs() < 1e-9);
}

#[test]
fn test_lenient_skill_count_bonus() {
    let mut few = empty_profile();
    few.skills = vec![Skill::new("Rust", SkillLevel::Beginner)];

    let mut many = few.clone();
    many.skills = (0..5)
        .map(|i| Skill::new(format!("Skill{i}"), SkillLevel::Beginner))
        .collect();

    // +0.2 skills bonus at >= 5 skills, weighted at 0.3.
    let delta = Lenient.evaluate(&many) - Lenient.evaluate(&few);
    assert!((delta - 0.06).abs() < 1e-9);
}

#[test]
fn test_lenient_completeness_step() {
    let mut profile = empty_profile();
    profile.summary = Some("Hi".to_string());
    profile.skills = vec![Skill::new("Rust", SkillLevel::Expert)];

    // Two sections reach the 0.8 flat completeness step.
    // skills 0.6*0.3 + experience 0.6*0.3 + education 0.7*0.2 + 0.8*0.2
    let score = Lenient.evaluate(&profile);
    assert!((score - 0.66).abs() < 1e-9);
}

#[test]
fn test_all_strategies_cap_at_one() {
    let profile = strong_profile();
    for strategy in [
        &Strict as &dyn EvaluationStrategy,
        &Balanced,
        &Lenient,
    ] {
        assert!(strategy.evaluate(&profile) <= 1.0);
    }
}

#[test]
fn test_skills_match_full_overlap_case_insensitive() {
    let mut profile = empty_profile();
    profile.skills = vec![
        Skill::new("RUST", SkillLevel::Expert),
        Skill::new("PostgreSQL", SkillLevel::Advanced),
    ];

    let required = vec!["rust".to_string(), "postgresql".to_string()];
    assert_eq!(evaluate_skills_match(&profile, &required), 1.0);
}

#[test]
fn test_skills_match_partial_and_empty() {
    let mut profile = empty_profile();
    profile.skills = vec![Skill::new("Rust", SkillLevel::Expert)];

    let required = vec!["rust".to_string(), "kubernetes".to_string()];
    assert_eq!(evaluate_skills_match(&profile, &required), 0.5);

    assert_eq!(evaluate_skills_match(&profile, &[]), 0.0);
    assert_eq!(
        evaluate_skills_match(&empty_profile(), &required),
        0.0
    );
}

#[test]
fn test_evaluator_defaults_to_balanced_and_swaps() {
    let evaluator = ProfileEvaluator::new();
    assert_eq!(evaluator.strategy_name(), "balanced");

    let profile = empty_profile();
    let balanced = evaluator.evaluate(&profile);
    assert!((balanced - Balanced.evaluate(&profile)).abs() < 1e-9);

    evaluator.set_strategy(Arc::new(Strict));
    assert_eq!(evaluator.strategy_name(), "strict");
    assert_eq!(evaluator.evaluate(&profile), 0.0);
}
