use super::{HttpClient, Result};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Status token for a Jellyseerr request update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Decline,
}

impl RequestAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The system that owns media requests and accepts status updates
#[async_trait]
pub trait RequestManager: Send + Sync {
    /// Apply an approve/decline action to a request. Success means the
    /// manager acknowledged the update with HTTP 200.
    async fn update_request(&self, request_id: &str, action: RequestAction) -> Result<()>;
}

/// Client for the Jellyseerr request API
pub struct JellyseerrClient {
    client: HttpClient,
    api_key: String,
}

impl JellyseerrClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(base_url, timeout),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl RequestManager for JellyseerrClient {
    async fn update_request(&self, request_id: &str, action: RequestAction) -> Result<()> {
        let endpoint = format!("/request/{request_id}/{action}");
        self.client.post_with_api_key(&endpoint, &self.api_key).await
    }
}
