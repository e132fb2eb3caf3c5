//! Shortlist HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use shortlist::aggregate::ScoreAggregator;
use shortlist::cache::ShortlistCacheService;
use shortlist::config::Config;
use shortlist::domain::{CandidateProfile, Experience, Job, Skill, SkillLevel};
use shortlist::evaluator::ProfileEvaluator;
use shortlist::gateway::{AppState, create_router};
use shortlist::matching::{HttpMatchClient, Matcher};
use shortlist::pipeline::{InMemoryDirectory, InMemoryMatchStore, ShortlistPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        strategy = ?config.strategy,
        match_url = %config.match_url,
        "shortlist engine starting"
    );

    let directory = Arc::new(InMemoryDirectory::new());
    let match_store = Arc::new(InMemoryMatchStore::new());
    if std::env::var_os("SHORTLIST_DEMO").is_some_and(|v| !v.is_empty()) {
        seed_demo_data(&directory);
        tracing::info!("demo job and candidates seeded (job id: demo-backend)");
    }

    let evaluator = Arc::new(ProfileEvaluator::with_strategy(
        config.strategy.instantiate(),
    ));
    let aggregator = ScoreAggregator::new(config.aggregation_config())?;
    let cache = Arc::new(ShortlistCacheService::new(config.cache_config()));

    let backend = Arc::new(HttpMatchClient::new(
        config.match_url.clone(),
        config.match_timeout,
    )?);
    let matcher = Arc::new(Matcher::new(backend, config.match_client_config()));

    let pipeline = Arc::new(ShortlistPipeline::new(
        directory.clone(),
        directory,
        match_store,
        evaluator,
        aggregator,
        matcher.clone(),
        cache.clone(),
    ));

    let app = create_router(AppState::new(pipeline, cache, matcher));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shortlist engine shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("SHORTLIST_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}

/// Seeds one job with three candidates so the endpoints can be exercised
/// without a data provider. Enabled via `SHORTLIST_DEMO=1`.
fn seed_demo_data(directory: &InMemoryDirectory) {
    directory.insert_job(Job {
        id: "demo-backend".to_string(),
        title: "Senior Backend Engineer".to_string(),
        description: "Own the ranking services".to_string(),
        requirements: "Rust, SQL, 3+ years".to_string(),
        skills: vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string()],
        location: Some("Remote".to_string()),
        job_type: Some("FULL_TIME".to_string()),
        salary_min: Some(90_000.0),
        salary_max: Some(140_000.0),
        min_experience_years: 3,
    });

    let candidates = vec![
        demo_candidate(
            "cand-1",
            "Ada Lovelace",
            &[
                ("Rust", SkillLevel::Expert),
                ("SQL", SkillLevel::Advanced),
                ("Docker", SkillLevel::Advanced),
            ],
            "Senior Engineer",
            2016,
            true,
        ),
        demo_candidate(
            "cand-2",
            "Grace Hopper",
            &[("Rust", SkillLevel::Intermediate), ("SQL", SkillLevel::Advanced)],
            "Engineer",
            2020,
            true,
        ),
        demo_candidate(
            "cand-3",
            "Alan Turing",
            &[("Python", SkillLevel::Advanced)],
            "Analyst",
            2023,
            false,
        ),
    ];
    directory.insert_candidates("demo-backend", candidates);
}

fn demo_candidate(
    id: &str,
    name: &str,
    skills: &[(&str, SkillLevel)],
    position: &str,
    start_year: i32,
    complete: bool,
) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        summary: Some(format!("{position} with production experience")),
        location: Some("Remote".to_string()),
        skills: skills
            .iter()
            .map(|(skill, level)| Skill::new(*skill, *level))
            .collect(),
        experience: vec![Experience {
            company: "Example Corp".to_string(),
            position: position.to_string(),
            description: String::new(),
            start_date: chrono::NaiveDate::from_ymd_opt(start_year, 1, 1),
            end_date: None,
        }],
        education: vec![],
        languages: vec![],
        complete,
    }
}
