use axum::Router;

use crate::Ctx;

pub mod availability;
pub mod health;
pub mod library;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(availability::mount())
        .merge(library::mount())
}
