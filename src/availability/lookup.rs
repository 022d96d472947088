use super::types::TmdbId;
use super::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Source of watch-provider data for a movie
#[async_trait]
pub trait WatchProviderSource: Send + Sync {
    /// Provider names offering the title under a subscription model in the
    /// given region, in upstream order.
    async fn flatrate_providers(&self, id: &TmdbId, region: &str) -> Result<Vec<String>>;
}

/// Keep only allow-listed provider names, preserving upstream order.
///
/// Comparison is case-sensitive: the allow-list carries provider names
/// exactly as the upstream API spells them.
#[must_use]
pub fn filter_allowed(providers: Vec<String>, allowlist: &[String]) -> Vec<String> {
    providers
        .into_iter()
        .filter(|name| allowlist.iter().any(|allowed| allowed == name))
        .collect()
}

/// Looks up where a movie can be streamed, filtered to the providers the
/// operator actually cares about.
pub struct ProviderLookup {
    source: Arc<dyn WatchProviderSource>,
    allowlist: Vec<String>,
    region: String,
}

impl ProviderLookup {
    pub fn new(
        source: Arc<dyn WatchProviderSource>,
        allowlist: Vec<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            source,
            allowlist,
            region: region.into(),
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn allowlist(&self) -> &[String] {
        &self.allowlist
    }

    /// Allow-listed providers the movie is currently streaming on.
    ///
    /// An empty list means "not available anywhere tracked". Upstream
    /// failures surface as an error, which is a distinct outcome.
    pub async fn available_on(&self, id: &TmdbId) -> Result<Vec<String>> {
        let upstream = self.source.flatrate_providers(id, &self.region).await?;
        let available = filter_allowed(upstream, &self.allowlist);

        debug!(
            tmdb_id = %id,
            region = %self.region,
            providers = ?available,
            "provider lookup completed"
        );

        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> Vec<String> {
        vec![
            "Netflix basic with Ads".to_string(),
            "Hulu".to_string(),
            "Disney Plus".to_string(),
        ]
    }

    #[test]
    fn test_filter_keeps_allowed_only() {
        let raw = vec![
            "Netflix basic with Ads".to_string(),
            "SomeObscureService".to_string(),
        ];

        let filtered = filter_allowed(raw, &allowlist());

        assert_eq!(filtered, vec!["Netflix basic with Ads"]);
    }

    #[test]
    fn test_filter_preserves_upstream_order() {
        let raw = vec![
            "Hulu".to_string(),
            "Netflix basic with Ads".to_string(),
            "Disney Plus".to_string(),
        ];

        let filtered = filter_allowed(raw, &allowlist());

        assert_eq!(filtered, vec!["Hulu", "Netflix basic with Ads", "Disney Plus"]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let raw = vec!["hulu".to_string(), "HULU".to_string()];

        let filtered = filter_allowed(raw, &allowlist());

        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_allowed(Vec::new(), &allowlist()).is_empty());
    }
}
