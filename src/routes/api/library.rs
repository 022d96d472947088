use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    ApiResponse, ApiResult, Ctx,
    error::ApiError,
    library::LibraryMovie,
};

/// Library listing response
#[derive(Debug, Serialize)]
pub struct LibraryMoviesResponse {
    pub items: Vec<LibraryMovie>,
    pub total: usize,
}

/// List library movies with their extracted TMDB IDs
/// GET /api/library/movies
async fn get_movies(State(ctx): State<Ctx>) -> ApiResult<LibraryMoviesResponse> {
    let jellyfin = ctx.jellyfin.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Jellyfin is not configured".to_string())
    })?;

    let items = jellyfin.movies().await?;
    let total = items.len();

    Ok(ApiResponse {
        code: 200,
        message: "Library movies retrieved".to_string(),
        data: Some(LibraryMoviesResponse { items, total }),
    })
}

/// Mount library routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/library/movies", get(get_movies))
}
