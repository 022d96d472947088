mod decision;
mod extract;
mod http;
mod jellyseerr;
mod lookup;
mod tmdb;
mod types;

pub use decision::{
    Decision, DecisionEngine, DecisionError, LookupFailurePolicy, MediaRef, Notification, Outcome,
    RequestRef, Verdict,
};
pub use extract::tmdb_id_from_path;
pub use http::HttpClient;
pub use jellyseerr::{JellyseerrClient, RequestAction, RequestManager};
pub use lookup::{ProviderLookup, WatchProviderSource, filter_allowed};
pub use tmdb::TmdbClient;
pub use types::TmdbId;


/// Result type for outbound API calls
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Errors from outbound calls to TMDB, Jellyseerr, or Jellyfin
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
