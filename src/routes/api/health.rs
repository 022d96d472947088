use axum::{Router, routing::get};

use crate::{ApiResponse, Ctx};

/// Liveness probe
/// GET /api/health
async fn health() -> ApiResponse<&'static str> {
    ApiResponse {
        code: 200,
        message: "OK".to_string(),
        data: Some("healthy"),
    }
}

/// Mount health routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
