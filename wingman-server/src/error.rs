use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use wingman_shared::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or empty. No model call was made.
    #[error("{0}")]
    Validation(&'static str),

    /// The generation call failed. Only the generic message leaves the server.
    #[error("{0}")]
    Upstream(&'static str),
}

impl ApiError {
    /// Log the real cause and keep only the generic message.
    pub fn upstream(message: &'static str, cause: anyhow::Error) -> Self {
        error!("{}: {:#}", message, cause);
        ApiError::Upstream(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
