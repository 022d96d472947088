use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;

use crate::{
    Ctx,
    availability::{DecisionError, Notification, Outcome, Verdict},
};

/// Webhook reply body for handled notifications
#[derive(Debug, Serialize)]
struct WebhookReply {
    status: &'static str,
    message: String,
}

/// Webhook reply body for client errors
#[derive(Debug, Serialize)]
struct WebhookError {
    error: String,
}

/// Handle a Jellyseerr notification
/// POST /webhook
async fn receive(State(ctx): State<Ctx>, Json(notification): Json<Notification>) -> Response {
    match ctx.engine.handle(&notification).await {
        Ok(Outcome::TestReceived) => (
            StatusCode::OK,
            Json(WebhookReply {
                status: "received",
                message: "Test notification received.".to_string(),
            }),
        )
            .into_response(),

        Ok(Outcome::Decided(decision)) => {
            let status = match decision.verdict {
                Verdict::Approve => "accepted",
                Verdict::Decline(_) => "rejected",
            };

            (
                StatusCode::OK,
                Json(WebhookReply {
                    status,
                    message: decision.message,
                }),
            )
                .into_response()
        }

        Err(err @ (DecisionError::MissingIdentifier | DecisionError::MissingRequestId)) => (
            StatusCode::BAD_REQUEST,
            Json(WebhookError {
                error: err.to_string(),
            }),
        )
            .into_response(),

        Err(err @ DecisionError::LookupFailed(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(WebhookReply {
                status: "error",
                message: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Mount the webhook route
pub fn mount() -> Router<Ctx> {
    Router::new().route("/webhook", post(receive))
}

#[cfg(test)]
mod tests {
    use crate::availability::LookupFailurePolicy;
    use crate::config::{
        JellyseerrSettings, ProviderSettings, ServerSettings, Settings, TmdbSettings,
    };
    use crate::{Ctx, routes};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn settings(tmdb_url: &str, jellyseerr_url: &str, policy: LookupFailurePolicy) -> Settings {
        Settings {
            timeout: 5,
            server: ServerSettings::default(),
            tmdb: TmdbSettings {
                url_base: tmdb_url.to_string(),
                api_key: "tmdb-key".to_string(),
                watch_region: "US".to_string(),
            },
            jellyseerr: JellyseerrSettings {
                url_base: jellyseerr_url.to_string(),
                api_key: "seerr-key".to_string(),
            },
            jellyfin: None,
            providers: ProviderSettings {
                allowlist: vec!["Netflix basic with Ads".to_string(), "Hulu".to_string()],
                on_lookup_failure: policy,
            },
        }
    }

    async fn post_webhook(ctx: Ctx, payload: Value) -> (StatusCode, Value) {
        let app = routes::mount().with_state(ctx);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();

        (status, body)
    }

    #[tokio::test]
    async fn test_available_movie_is_rejected_end_to_end() {
        let tmdb = MockServer::start_async().await;
        let jellyseerr = MockServer::start_async().await;

        let providers_mock = tmdb
            .mock_async(|when, then| {
                when.method(GET).path("/movie/603/watch/providers");
                then.status(200).json_body(json!({
                    "id": 603,
                    "results": {
                        "US": {"flatrate": [{"provider_id": 15, "provider_name": "Hulu"}]}
                    }
                }));
            })
            .await;

        let decline_mock = jellyseerr
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/request/42/decline")
                    .header("X-Api-Key", "seerr-key");
                then.status(200);
            })
            .await;

        let ctx = Ctx::from_settings(settings(
            &tmdb.base_url(),
            &jellyseerr.base_url(),
            LookupFailurePolicy::Approve,
        ));

        let (status, body) = post_webhook(
            ctx,
            json!({
                "notification_type": "MEDIA_PENDING",
                "media": {"tmdbId": "603"},
                "request": {"request_id": "42"},
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "rejected");
        assert_eq!(
            body["message"],
            "Movie is available on the following streaming services: Hulu."
        );
        providers_mock.assert_async().await;
        decline_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unavailable_movie_is_accepted_end_to_end() {
        let tmdb = MockServer::start_async().await;
        let jellyseerr = MockServer::start_async().await;

        tmdb.mock_async(|when, then| {
            when.method(GET).path("/movie/603/watch/providers");
            then.status(200).json_body(json!({"id": 603, "results": {}}));
        })
        .await;

        let approve_mock = jellyseerr
            .mock_async(|when, then| {
                when.method(POST).path("/request/42/approve");
                then.status(200);
            })
            .await;

        let ctx = Ctx::from_settings(settings(
            &tmdb.base_url(),
            &jellyseerr.base_url(),
            LookupFailurePolicy::Approve,
        ));

        let (status, body) = post_webhook(
            ctx,
            json!({
                "notification_type": "MEDIA_PENDING",
                "media": {"tmdbId": "603"},
                "request": {"request_id": "42"},
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(
            body["message"],
            "Movie is not available on any streaming services"
        );
        approve_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_test_notification_makes_no_outbound_calls() {
        let tmdb = MockServer::start_async().await;
        let jellyseerr = MockServer::start_async().await;

        let providers_mock = tmdb
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(json!({}));
            })
            .await;
        let update_mock = jellyseerr
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let ctx = Ctx::from_settings(settings(
            &tmdb.base_url(),
            &jellyseerr.base_url(),
            LookupFailurePolicy::Approve,
        ));

        let (status, body) =
            post_webhook(ctx, json!({"notification_type": "TEST_NOTIFICATION"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "received");
        assert_eq!(body["message"], "Test notification received.");
        assert_eq!(providers_mock.hits_async().await, 0);
        assert_eq!(update_mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_missing_tmdb_id_is_bad_request() {
        let tmdb = MockServer::start_async().await;
        let jellyseerr = MockServer::start_async().await;

        let any_tmdb = tmdb
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(json!({}));
            })
            .await;

        let ctx = Ctx::from_settings(settings(
            &tmdb.base_url(),
            &jellyseerr.base_url(),
            LookupFailurePolicy::Approve,
        ));

        let (status, body) = post_webhook(
            ctx,
            json!({
                "notification_type": "MEDIA_PENDING",
                "media": {},
                "request": {"request_id": "42"},
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No TMDB ID provided");
        assert_eq!(any_tmdb.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_error_policy_is_bad_gateway() {
        let tmdb = MockServer::start_async().await;
        let jellyseerr = MockServer::start_async().await;

        tmdb.mock_async(|when, then| {
            when.method(GET).path("/movie/603/watch/providers");
            then.status(500).body("tmdb down");
        })
        .await;

        let update_mock = jellyseerr
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let ctx = Ctx::from_settings(settings(
            &tmdb.base_url(),
            &jellyseerr.base_url(),
            LookupFailurePolicy::Error,
        ));

        let (status, body) = post_webhook(
            ctx,
            json!({
                "notification_type": "MEDIA_PENDING",
                "media": {"tmdbId": "603"},
                "request": {"request_id": "42"},
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert_eq!(update_mock.hits_async().await, 0);
    }
}
