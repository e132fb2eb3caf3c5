//! Configuration error types.

use thiserror::Error;

use crate::aggregate::AggregationError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Weight override could not be parsed as a float.
    #[error("failed to parse {name}='{value}': {source}")]
    WeightParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// `SHORTLIST_STRATEGY` is not one of strict/balanced/lenient.
    #[error("unknown evaluation strategy '{value}' (expected strict, balanced, or lenient)")]
    UnknownStrategy { value: String },

    /// A duration setting was set to zero.
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },

    /// The aggregation weights do not form a valid configuration.
    #[error("invalid aggregation config: {0}")]
    Aggregation(#[from] AggregationError),
}
