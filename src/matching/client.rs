//! HTTP transport for the external match service.

use std::time::Duration;

use async_trait::async_trait;

use super::error::MatchError;
use super::model::{
    BatchMatchRequest, BatchMatchResponse, ExplainMatchRequest, ExplainMatchResponse,
    HealthResponse, HealthStatus,
};

/// Default outbound timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport used by higher-level code. Mockable in tests.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    /// Ranks a candidate batch against a job in a single call.
    async fn match_batch(&self, request: &BatchMatchRequest)
    -> Result<BatchMatchResponse, MatchError>;

    /// Detailed explanation for one (candidate, job) pair.
    async fn explain_match(
        &self,
        request: &ExplainMatchRequest,
    ) -> Result<ExplainMatchResponse, MatchError>;

    /// Service reachability. Errors collapse to [`HealthStatus::Unavailable`].
    async fn health(&self) -> HealthStatus;
}

/// Reqwest-backed client with a bounded timeout on every call.
#[derive(Debug, Clone)]
pub struct HttpMatchClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMatchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MatchError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MatchError::ServiceUnavailable {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<Req, Res>(&self, path: &str, body: &Req) -> Result<Res, MatchError>
    where
        Req: serde::Serialize + Sync,
        Res: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| MatchError::ServiceUnavailable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MatchError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| MatchError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MatchBackend for HttpMatchClient {
    async fn match_batch(
        &self,
        request: &BatchMatchRequest,
    ) -> Result<BatchMatchResponse, MatchError> {
        tracing::debug!(
            job_id = %request.job.id,
            candidates = request.candidates.len(),
            "calling match service batch endpoint"
        );
        self.post_json("/api/match/batch", request).await
    }

    async fn explain_match(
        &self,
        request: &ExplainMatchRequest,
    ) -> Result<ExplainMatchResponse, MatchError> {
        self.post_json("/api/match/explain", request).await
    }

    async fn health(&self) -> HealthStatus {
        let url = format!("{}/health", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "match service health probe failed");
                return HealthStatus::Unavailable;
            }
        };

        if !response.status().is_success() {
            return HealthStatus::Unavailable;
        }

        match response.json::<HealthResponse>().await {
            Ok(body) => HealthStatus::Available(body),
            Err(_) => HealthStatus::Unavailable,
        }
    }
}
