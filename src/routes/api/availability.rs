use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::{
    ApiResponse, ApiResult, Ctx,
    availability::{TmdbId, WatchProviderSource, filter_allowed},
    error::ApiError,
};

/// Availability report for one movie
#[derive(Debug, Serialize)]
pub struct AvailabilityReport {
    pub tmdb_id: TmdbId,
    pub title: String,
    pub region: String,
    /// Provider names as reported upstream, unfiltered
    pub providers: Vec<String>,
    /// The allow-listed subset that drives verdicts
    pub available_on: Vec<String>,
}

/// Report where a movie can be streamed
/// GET /api/availability/{tmdb_id}
async fn get_availability(
    State(ctx): State<Ctx>,
    Path(raw_id): Path<String>,
) -> ApiResult<AvailabilityReport> {
    let tmdb_id = TmdbId::new(&raw_id)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid TMDB ID: {raw_id}")))?;

    let region = ctx.settings.tmdb.watch_region.clone();
    let title = ctx.tmdb.movie_title(&tmdb_id).await?;
    let providers = ctx.tmdb.flatrate_providers(&tmdb_id, &region).await?;
    let available_on = filter_allowed(providers.clone(), &ctx.settings.providers.allowlist);

    Ok(ApiResponse {
        code: 200,
        message: "Availability retrieved".to_string(),
        data: Some(AvailabilityReport {
            tmdb_id,
            title,
            region,
            providers,
            available_on,
        }),
    })
}

/// Mount availability routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/availability/{tmdb_id}", get(get_availability))
}
