//! End-to-end presence flow over the HTTP surface.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use helpdesk_core::error::AppError;
use helpdesk_core::result::AppResult;
use helpdesk_database::store::PresenceStore;
use helpdesk_entity::presence::PresenceState;
use helpdesk_realtime::{ChannelType, OutboundMessage};

use helpers::{TestApp, test_config};

#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl PresenceStore for UnreachableStore {
    async fn upsert(&self, _: Uuid, _: bool, _: DateTime<Utc>) -> AppResult<PresenceState> {
        Err(AppError::database("connection refused"))
    }

    async fn find(&self, _: Uuid) -> AppResult<Option<PresenceState>> {
        Err(AppError::database("connection refused"))
    }

    async fn list_online(&self) -> AppResult<Vec<PresenceState>> {
        Err(AppError::database("connection refused"))
    }

    async fn count_online(&self) -> AppResult<u64> {
        Err(AppError::database("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::database("connection refused"))
    }
}

#[tokio::test]
async fn test_login_then_logout_flips_presence() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();

    assert_eq!(
        app.auth_event("login", user_id, "Ada").await,
        StatusCode::NO_CONTENT
    );
    let (status, body) = app
        .request("GET", &format!("/api/presence/{user_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_online"], true);
    let first_seen: DateTime<Utc> =
        serde_json::from_value(body["data"]["last_seen_at"].clone()).unwrap();

    assert_eq!(
        app.auth_event("logout", user_id, "Ada").await,
        StatusCode::NO_CONTENT
    );
    let (_, body) = app
        .request("GET", &format!("/api/presence/{user_id}"), None)
        .await;
    assert_eq!(body["data"]["is_online"], false);
    let last_seen: DateTime<Utc> =
        serde_json::from_value(body["data"]["last_seen_at"].clone()).unwrap();
    assert!(last_seen >= first_seen);
}

#[tokio::test]
async fn test_repeated_login_keeps_one_record() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();

    app.auth_event("login", user_id, "Ada").await;
    app.auth_event("login", user_id, "Ada").await;

    let (status, body) = app.request("GET", "/api/presence/online", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["users"][0]["user_id"], user_id.to_string());
}

#[tokio::test]
async fn test_online_listing_excludes_logged_out_users() {
    let app = TestApp::new();
    let ada = Uuid::new_v4();
    let grace = Uuid::new_v4();

    app.auth_event("login", ada, "Ada").await;
    app.auth_event("login", grace, "Grace").await;
    app.auth_event("logout", ada, "Ada").await;

    let (_, body) = app.request("GET", "/api/presence/online", None).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["users"][0]["user_id"], grace.to_string());
}

#[tokio::test]
async fn test_logout_without_login_creates_offline_record() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();

    app.auth_event("logout", user_id, "Ada").await;

    let (status, body) = app
        .request("GET", &format!("/api/presence/{user_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_online"], false);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .request("GET", &format!("/api/presence/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .request(
            "POST",
            "/api/auth/events",
            Some(serde_json::json!({ "type": "password_reset" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_event_with_id_only_user_is_accepted() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/events",
            Some(serde_json::json!({ "type": "login", "user": { "id": user_id } })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request("GET", &format!("/api/presence/{user_id}"), None)
        .await;
    assert_eq!(body["data"]["is_online"], true);
}

#[tokio::test]
async fn test_login_announces_on_global_and_user_channels() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let mut global = app.state.pubsub.subscribe(&ChannelType::PresenceGlobal).await;
    let mut own = app
        .state
        .pubsub
        .subscribe(&ChannelType::PresenceUser(user_id))
        .await;

    app.auth_event("login", user_id, "Ada").await;

    for rx in [&mut global, &mut own] {
        match rx.recv().await.unwrap() {
            OutboundMessage::UserOnline { user_id: id, name, .. } => {
                assert_eq!(id, user_id);
                assert_eq!(name, "Ada");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_store_failure_surfaces_to_caller() {
    let app = TestApp::with_store(test_config(), Arc::new(UnreachableStore));

    let status = app.auth_event("login", Uuid::new_v4(), "Ada").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = app.request("GET", "/api/presence/online", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["store"], true);
    assert_eq!(body["data"]["broadcast_connected"], false);
    assert_eq!(body["data"]["broadcast_relay"], false);

    let broken = TestApp::with_store(test_config(), Arc::new(UnreachableStore));
    let (status, body) = broken.request("GET", "/api/health/detailed", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["status"], "degraded");
}
