pub mod availability;
pub mod config;
pub mod error;
pub mod library;
pub mod routes;

use crate::availability::{
    DecisionEngine, JellyseerrClient, ProviderLookup, TmdbClient, WatchProviderSource,
};
use crate::config::Settings;
use crate::library::JellyfinClient;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;

/// Standard API response envelope for the `/api` routes
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Result type for `/api` route handlers
pub type ApiResult<T> = Result<ApiResponse<T>, error::SeergateError>;

/// Shared application context handed to every route
#[derive(Clone)]
pub struct Ctx {
    pub engine: Arc<DecisionEngine>,
    pub tmdb: Arc<TmdbClient>,
    pub jellyfin: Option<Arc<JellyfinClient>>,
    pub settings: Arc<Settings>,
}

impl Ctx {
    /// Build all outbound clients and the decision engine from settings.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        let timeout = settings.call_timeout();

        let tmdb = Arc::new(TmdbClient::new(
            settings.tmdb.url_base.clone(),
            settings.tmdb.api_key.clone(),
            timeout,
        ));

        let jellyseerr = Arc::new(JellyseerrClient::new(
            settings.jellyseerr.url_base.clone(),
            settings.jellyseerr.api_key.clone(),
            timeout,
        ));

        let lookup = ProviderLookup::new(
            Arc::clone(&tmdb) as Arc<dyn WatchProviderSource>,
            settings.providers.allowlist.clone(),
            settings.tmdb.watch_region.clone(),
        );

        let engine = Arc::new(DecisionEngine::new(
            lookup,
            jellyseerr,
            settings.providers.on_lookup_failure,
        ));

        let jellyfin = settings.jellyfin.as_ref().map(|jellyfin| {
            Arc::new(JellyfinClient::new(
                jellyfin.url_base.clone(),
                jellyfin.api_key.clone(),
                timeout,
            ))
        });

        Self {
            engine,
            tmdb,
            jellyfin,
            settings: Arc::new(settings),
        }
    }
}
