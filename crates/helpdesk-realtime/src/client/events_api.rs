//! Server-side publishing through the broadcast service's HTTP events API.
//!
//! Events are POSTed to `/apps/{app_id}/events` and signed with the app
//! secret (HMAC-SHA256 over method, path and the sorted auth query). Client
//! sockets can only send `client-` events on authorized channels, so
//! server-originated presence changes go through this API instead.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;

use helpdesk_core::config::BroadcastConfig;
use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme revision sent as `auth_version`.
pub const AUTH_VERSION: &str = "1.0";

/// Request body of a trigger call.
#[derive(Debug, Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: &'a [&'a str],
    /// JSON-encoded payload.
    data: String,
}

/// Signed publisher for the HTTP events API.
#[derive(Clone)]
pub struct EventsApi {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    key: String,
    secret: String,
}

impl fmt::Debug for EventsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventsApi")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl EventsApi {
    /// Build a publisher from configuration.
    ///
    /// Returns `Ok(None)` when the app id or secret is missing.
    pub fn from_config(config: &BroadcastConfig) -> AppResult<Option<Self>> {
        let Some((app_id, secret)) = config.api_credentials() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to build broadcast HTTP client",
                    e,
                )
            })?;

        Ok(Some(Self {
            http,
            base_url: config.api_base_url(),
            app_id: app_id.to_string(),
            key: config.key.clone(),
            secret: secret.to_string(),
        }))
    }

    /// Path of the trigger endpoint.
    pub fn events_path(&self) -> String {
        format!("/apps/{}/events", self.app_id)
    }

    /// Publish one event on the given channels.
    pub async fn trigger(&self, channels: &[&str], event: &str, payload: &Value) -> AppResult<()> {
        let body = serde_json::to_vec(&TriggerBody {
            name: event,
            channels,
            data: payload.to_string(),
        })?;

        let path = self.events_path();
        let query = self.signed_query(&path, &body, Utc::now().timestamp())?;
        let url = format!("{}{}?{}", self.base_url, path, query);

        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Broadcast events request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Broadcast service rejected event '{event}': {status} {detail}"
            )));
        }

        debug!(event, channels = ?channels, "Event published to broadcast service");
        Ok(())
    }

    /// The signed query string for a POST of `body` to `path`.
    pub fn signed_query(&self, path: &str, body: &[u8], timestamp: i64) -> AppResult<String> {
        let mut params = BTreeMap::new();
        params.insert("auth_key", self.key.clone());
        params.insert("auth_timestamp", timestamp.to_string());
        params.insert("auth_version", AUTH_VERSION.to_string());
        params.insert("body_md5", hex::encode(Md5::digest(body)));

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let signature = sign(&self.secret, &format!("POST\n{path}\n{query}"))?;

        Ok(format!("{query}&auth_signature={signature}"))
    }
}

/// Hex HMAC-SHA256 of `payload` under `secret`.
pub fn sign(secret: &str, payload: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal(format!("Invalid signing key: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
pub(crate) mod events_sink {
    //! Local HTTP endpoint recording trigger calls.

    use std::collections::BTreeMap;

    use axum::Router;
    use axum::body::Bytes;
    use axum::extract::{Path, RawQuery};
    use axum::http::StatusCode;
    use axum::routing::post;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    use helpdesk_core::config::BroadcastConfig;

    /// Broadcast settings pointing at a local sink, app `42`.
    pub(crate) fn api_config(port: u16) -> BroadcastConfig {
        BroadcastConfig {
            host: "127.0.0.1".to_string(),
            port: Some(port),
            key: "desk-key".to_string(),
            app_id: Some("42".to_string()),
            secret: Some("desk-secret".to_string()),
            ..BroadcastConfig::default()
        }
    }

    /// One recorded trigger request.
    #[derive(Debug)]
    pub(crate) struct Captured {
        pub app_id: String,
        pub query: String,
        pub body: Vec<u8>,
    }

    impl Captured {
        pub(crate) fn params(&self) -> BTreeMap<String, String> {
            self.query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        pub(crate) fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    /// Serve `/apps/{app_id}/events`, answering every call with `status`.
    pub(crate) async fn spawn(status: StatusCode) -> (u16, mpsc::UnboundedReceiver<Captured>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new().route(
            "/apps/{app_id}/events",
            post(
                move |Path(app_id): Path<String>, RawQuery(query): RawQuery, body: Bytes| {
                    let tx = tx.clone();
                    async move {
                        let _ = tx.send(Captured {
                            app_id,
                            query: query.unwrap_or_default(),
                            body: body.to_vec(),
                        });
                        (status, "{}")
                    }
                },
            ),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (port, rx)
    }
}
