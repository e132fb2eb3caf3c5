//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SHORTLIST_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::aggregate::AggregationConfig;
use crate::cache::CacheConfig;
use crate::evaluator::{Balanced, EvaluationStrategy, Lenient, Strict};
use crate::matching::MatchClientConfig;

/// Default match service URL used when `SHORTLIST_MATCH_URL` is not set.
pub const DEFAULT_MATCH_URL: &str = "http://localhost:8000";

/// Evaluation strategy selection, parsed from `SHORTLIST_STRATEGY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    Strict,
    #[default]
    Balanced,
    Lenient,
}

impl StrategyKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "balanced" => Some(Self::Balanced),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }

    pub fn instantiate(self) -> Arc<dyn EvaluationStrategy> {
        match self {
            Self::Strict => Arc::new(Strict),
            Self::Balanced => Arc::new(Balanced),
            Self::Lenient => Arc::new(Lenient),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SHORTLIST_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Match service base URL. Default: `http://localhost:8000`.
    pub match_url: String,

    /// Timeout for outbound match calls. Default: 30s.
    pub match_timeout: Duration,

    /// Whether the external match service is called at all. Default: `true`.
    pub match_enabled: bool,

    /// Whether match failures degrade to the local scorer. Default: `true`.
    pub match_fallback_enabled: bool,

    /// Shortlist cache TTL. Default: 1800s.
    pub cache_ttl: Duration,

    /// Max entries in the shortlist cache. Default: `1_000`.
    pub cache_capacity: u64,

    /// Whether the shortlist cache is active. Default: `true`.
    pub cache_enabled: bool,

    /// Aggregation weight for the AI score. Default: `0.6`.
    pub ai_weight: f64,

    /// Aggregation weight for the ATS score. Default: `0.3`.
    pub ats_weight: f64,

    /// Aggregation weight for profile completeness. Default: `0.1`.
    pub profile_weight: f64,

    /// Profile evaluation strategy. Default: balanced.
    pub strategy: StrategyKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            match_url: DEFAULT_MATCH_URL.to_string(),
            match_timeout: Duration::from_secs(30),
            match_enabled: true,
            match_fallback_enabled: true,
            cache_ttl: Duration::from_secs(1800),
            cache_capacity: 1_000,
            cache_enabled: true,
            ai_weight: 0.6,
            ats_weight: 0.3,
            profile_weight: 0.1,
            strategy: StrategyKind::Balanced,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SHORTLIST_PORT";
    const ENV_BIND_ADDR: &'static str = "SHORTLIST_BIND_ADDR";
    const ENV_MATCH_URL: &'static str = "SHORTLIST_MATCH_URL";
    const ENV_MATCH_TIMEOUT_SECS: &'static str = "SHORTLIST_MATCH_TIMEOUT_SECS";
    const ENV_MATCH_ENABLED: &'static str = "SHORTLIST_MATCH_ENABLED";
    const ENV_MATCH_FALLBACK: &'static str = "SHORTLIST_MATCH_FALLBACK";
    const ENV_CACHE_TTL_SECS: &'static str = "SHORTLIST_CACHE_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "SHORTLIST_CACHE_CAPACITY";
    const ENV_CACHE_ENABLED: &'static str = "SHORTLIST_CACHE_ENABLED";
    const ENV_AI_WEIGHT: &'static str = "SHORTLIST_AI_WEIGHT";
    const ENV_ATS_WEIGHT: &'static str = "SHORTLIST_ATS_WEIGHT";
    const ENV_PROFILE_WEIGHT: &'static str = "SHORTLIST_PROFILE_WEIGHT";
    const ENV_STRATEGY: &'static str = "SHORTLIST_STRATEGY";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let match_url = Self::parse_string_from_env(Self::ENV_MATCH_URL, defaults.match_url);
        let match_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_MATCH_TIMEOUT_SECS,
            defaults.match_timeout.as_secs(),
        ));
        let match_enabled =
            Self::parse_bool_from_env(Self::ENV_MATCH_ENABLED, defaults.match_enabled);
        let match_fallback_enabled =
            Self::parse_bool_from_env(Self::ENV_MATCH_FALLBACK, defaults.match_fallback_enabled);
        let cache_ttl = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_CACHE_TTL_SECS,
            defaults.cache_ttl.as_secs(),
        ));
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let cache_enabled =
            Self::parse_bool_from_env(Self::ENV_CACHE_ENABLED, defaults.cache_enabled);
        let ai_weight = Self::parse_weight_from_env(Self::ENV_AI_WEIGHT, defaults.ai_weight)?;
        let ats_weight = Self::parse_weight_from_env(Self::ENV_ATS_WEIGHT, defaults.ats_weight)?;
        let profile_weight =
            Self::parse_weight_from_env(Self::ENV_PROFILE_WEIGHT, defaults.profile_weight)?;
        let strategy = Self::parse_strategy_from_env(defaults.strategy)?;

        Ok(Self {
            port,
            bind_addr,
            match_url,
            match_timeout,
            match_enabled,
            match_fallback_enabled,
            cache_ttl,
            cache_capacity,
            cache_enabled,
            ai_weight,
            ats_weight,
            profile_weight,
            strategy,
        })
    }

    /// Validates cross-field invariants, chiefly the weight sum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregation_config().validate()?;

        if self.match_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: Self::ENV_MATCH_TIMEOUT_SECS,
            });
        }
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: Self::ENV_CACHE_TTL_SECS,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn aggregation_config(&self) -> AggregationConfig {
        AggregationConfig::with_weights(self.ai_weight, self.ats_weight, self.profile_weight)
    }

    pub fn match_client_config(&self) -> MatchClientConfig {
        MatchClientConfig {
            base_url: self.match_url.clone(),
            timeout: self.match_timeout,
            enabled: self.match_enabled,
            fallback_enabled: self.match_fallback_enabled,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.cache_ttl,
            capacity: self.cache_capacity,
            enabled: self.cache_enabled,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_strategy_from_env(default: StrategyKind) -> Result<StrategyKind, ConfigError> {
        match env::var(Self::ENV_STRATEGY) {
            Ok(value) => {
                StrategyKind::parse(&value).ok_or(ConfigError::UnknownStrategy { value })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_weight_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::WeightParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }
}
