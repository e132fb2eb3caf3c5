//! Match client errors.

use thiserror::Error;

/// Errors returned by the external match service client.
///
/// With a fallback configured these are recovered locally; otherwise they
/// propagate to the caller wrapping the original cause.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Transport failure or timeout reaching the service.
    #[error("match service unreachable at '{url}': {message}")]
    ServiceUnavailable { url: String, message: String },

    /// The service answered with a non-2xx status.
    #[error("match service returned {status}: {message}")]
    BadStatus { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode match service response: {message}")]
    Decode { message: String },
}
