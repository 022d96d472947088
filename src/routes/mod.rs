use axum::Router;

use crate::Ctx;

pub mod api;
pub mod webhook;

/// Mount all routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(webhook::mount())
        .nest("/api", api::mount())
}
