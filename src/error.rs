use crate::ApiResponse;
use crate::availability::UpstreamError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum SeergateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors surfaced directly on the HTTP API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl SeergateError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ApiError(ApiError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            Self::ApiError(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ApiError(ApiError::ServiceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SeergateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiResponse::<()> {
            code: status.as_u16(),
            message: self.to_string(),
            data: None,
        };

        (status, Json(body)).into_response()
    }
}
