use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::matching::MatchError;
use crate::pipeline::{PipelineError, ProviderError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("match service error: {0}")]
    MatchService(#[from] MatchError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for GatewayError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::JobNotFound { job_id } => Self::JobNotFound { job_id },
            PipelineError::Match(e) => Self::MatchService(e),
            PipelineError::Provider(e) => Self::Provider(e),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::JobNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::MatchService(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Provider(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
