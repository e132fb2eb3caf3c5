//! Shortlist engine library crate (used by the server and integration
//! tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`ScoreAggregator`], [`AggregationConfig`] - Score fusion
//! - [`ProfileEvaluator`], [`EvaluationStrategy`] - ATS profile scoring
//! - [`ShortlistPipeline`] - Generation orchestrator
//! - [`ShortlistCacheService`], [`CacheStats`] - TTL cache over shortlists
//!
//! ## Matching
//! - [`Matcher`], [`HttpMatchClient`], [`MatchBackend`] - External match
//!   service client with local degradation
//! - [`rank_locally`] - The fallback heuristic scorer
//!
//! ## Gateway
//! - [`gateway::create_router`], [`gateway::AppState`] - Axum surface
//!
//! ## Test/Mock Support
//! Mock implementations are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod gateway;
pub mod matching;
pub mod pipeline;

pub use aggregate::{
    AggregationConfig, AggregationError, CandidateScore, CandidateState, ScoreAggregator,
    Shortlist, WEIGHT_TOLERANCE, round_to_decimal_places,
};
pub use cache::{
    CacheConfig, CacheStats, MokaStore, RecentAccess, ShortlistCacheService, ShortlistStore,
};
pub use config::{Config, ConfigError, StrategyKind};
pub use domain::{
    CandidateProfile, Education, Experience, Job, Language, Skill, SkillLevel,
};
pub use evaluator::{
    Balanced, EvaluationStrategy, Lenient, ProfileEvaluator, Strict, evaluate_skills_match,
};
pub use matching::{
    BatchMatchResponse, HealthStatus, HttpMatchClient, MatchBackend, MatchClientConfig,
    MatchError, MatchQuality, Matcher, RankedMatch, rank_locally,
};
#[cfg(any(test, feature = "mock"))]
pub use matching::MockMatchClient;
pub use pipeline::{
    CandidateProvider, DEFAULT_AI_SCORE, InMemoryDirectory, InMemoryMatchStore, JobProvider,
    MatchRecordStore, PipelineError, ProviderError, ShortlistPipeline,
};
