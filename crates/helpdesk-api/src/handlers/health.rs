//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use helpdesk_realtime::ChannelType;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
///
/// Answers 503 when the presence store is unreachable. A missing broadcast
/// connection or relay only degrades realtime delivery and keeps 200.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<DetailedHealthResponse>>) {
    let store = state.tracker.store_healthy().await;
    let broadcast_connected = state.broadcaster.remote_connected();
    let broadcast_relay = state.broadcaster.relay_enabled();
    let presence_subscribers = state
        .pubsub
        .subscriber_count(&ChannelType::PresenceGlobal)
        .await;

    let status = if store {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::ok(DetailedHealthResponse {
            status: if store { "ok" } else { "degraded" }.to_string(),
            store,
            broadcast_connected,
            broadcast_relay,
            presence_subscribers,
        })),
    )
}
