use super::jellyseerr::{RequestAction, RequestManager};
use super::lookup::ProviderLookup;
use super::types::TmdbId;
use super::UpstreamError;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{error, info, warn};

const TEST_NOTIFICATION: &str = "TEST_NOTIFICATION";
const REJECT_MSG: &str = "Movie is available on the following streaming services:";
const ACCEPT_MSG: &str = "Movie is not available on any streaming services";
const UNVERIFIED_MSG: &str = "Availability could not be verified";

/// Inbound webhook notification, reduced to the fields we consume
#[derive(Debug, Default, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub media: Option<MediaRef>,
    #[serde(default)]
    pub request: Option<RequestRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaRef {
    #[serde(default, rename = "tmdbId", deserialize_with = "string_or_number")]
    pub tmdb_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub request_id: Option<String>,
}

/// Jellyseerr sends identifiers as strings or bare numbers depending on the
/// notification agent; accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The automated accept/decline decision for a media request.
///
/// Decline carries the allow-listed providers that justified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Approve,
    Decline(Vec<String>),
}

impl Verdict {
    #[must_use]
    pub const fn action(&self) -> RequestAction {
        match self {
            Self::Approve => RequestAction::Approve,
            Self::Decline(_) => RequestAction::Decline,
        }
    }

    /// Human-readable summary for the webhook response
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Approve => ACCEPT_MSG.to_string(),
            Self::Decline(providers) if providers.is_empty() => {
                format!("{UNVERIFIED_MSG}; request declined.")
            }
            Self::Decline(providers) => format!("{REJECT_MSG} {}.", providers.join(", ")),
        }
    }
}

/// Structured result of handling one notification
#[derive(Debug)]
pub struct Decision {
    pub verdict: Verdict,
    pub message: String,
    /// Whether the downstream status update was acknowledged
    pub status_updated: bool,
}

/// Outcome of one webhook invocation
#[derive(Debug)]
pub enum Outcome {
    /// Connectivity test; no outbound calls were made
    TestReceived,
    Decided(Decision),
}

/// Errors that abort a decision before any verdict is reached
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("No TMDB ID provided")]
    MissingIdentifier,

    #[error("No request ID provided")]
    MissingRequestId,

    #[error("Availability lookup failed: {0}")]
    LookupFailed(#[source] UpstreamError),
}

/// What to do when the availability lookup itself fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupFailurePolicy {
    /// Treat the movie as unavailable and approve the request
    #[default]
    Approve,
    /// Decline the request; nothing could be verified
    Decline,
    /// Surface the failure to the caller without a status update
    Error,
}

/// Combines extraction and lookup into an accept/decline verdict and pushes
/// the matching status update to the request manager.
pub struct DecisionEngine {
    lookup: ProviderLookup,
    requests: Arc<dyn RequestManager>,
    on_lookup_failure: LookupFailurePolicy,
}

impl DecisionEngine {
    pub fn new(
        lookup: ProviderLookup,
        requests: Arc<dyn RequestManager>,
        on_lookup_failure: LookupFailurePolicy,
    ) -> Self {
        Self {
            lookup,
            requests,
            on_lookup_failure,
        }
    }

    /// Handle one inbound notification.
    ///
    /// Performs at most one lookup call and one status-update call. Holds no
    /// state across invocations; repeated delivery of the same notification
    /// re-issues the status update and relies on the request manager to
    /// handle duplicates.
    pub async fn handle(&self, notification: &Notification) -> Result<Outcome, DecisionError> {
        if notification.notification_type.as_deref() == Some(TEST_NOTIFICATION) {
            info!("Test notification received");
            return Ok(Outcome::TestReceived);
        }

        let tmdb_id = notification
            .media
            .as_ref()
            .and_then(|media| media.tmdb_id.as_deref())
            .and_then(TmdbId::new)
            .ok_or(DecisionError::MissingIdentifier)?;

        let request_id = notification
            .request
            .as_ref()
            .and_then(|request| request.request_id.as_deref())
            .ok_or(DecisionError::MissingRequestId)?;

        let verdict = match self.lookup.available_on(&tmdb_id).await {
            Ok(providers) if providers.is_empty() => Verdict::Approve,
            Ok(providers) => Verdict::Decline(providers),
            Err(err) => {
                warn!(
                    tmdb_id = %tmdb_id,
                    policy = ?self.on_lookup_failure,
                    "availability lookup failed: {err}"
                );
                match self.on_lookup_failure {
                    LookupFailurePolicy::Approve => Verdict::Approve,
                    LookupFailurePolicy::Decline => Verdict::Decline(Vec::new()),
                    LookupFailurePolicy::Error => return Err(DecisionError::LookupFailed(err)),
                }
            }
        };

        let action = verdict.action();
        let status_updated = match self.requests.update_request(request_id, action).await {
            Ok(()) => {
                info!("Request {request_id} {action}d successfully");
                true
            }
            Err(err) => {
                error!("Error updating request {request_id} status: {err}");
                false
            }
        };

        let message = verdict.message();

        Ok(Outcome::Decided(Decision {
            verdict,
            message,
            status_updated,
        }))
    }
}
