//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use helpdesk_api::AppState;
use helpdesk_core::config::AppConfig;
use helpdesk_database::MemoryPresenceStore;
use helpdesk_database::store::PresenceStore;
use helpdesk_realtime::RemoteBroadcast;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to the tracker and pub/sub
    pub state: AppState,
}

impl TestApp {
    /// Create a test application over an in-memory store
    pub fn new() -> Self {
        Self::with_store(test_config(), Arc::new(MemoryPresenceStore::new()))
    }

    /// Create a test application with a custom config and store
    pub fn with_store(config: AppConfig, store: Arc<dyn PresenceStore>) -> Self {
        let state = AppState::new(config, store, RemoteBroadcast::default());
        let router = helpdesk_api::build_app(state.clone());
        Self { router, state }
    }

    /// Make a JSON request and return status + parsed body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Post an auth event for a user
    pub async fn auth_event(&self, kind: &str, user_id: Uuid, name: &str) -> StatusCode {
        let body = serde_json::json!({
            "type": kind,
            "user": { "id": user_id, "name": name },
        });
        self.request("POST", "/api/auth/events", Some(body)).await.0
    }
}

/// Default config with the broadcast relay disabled
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.broadcast.enabled = false;
    config
}
