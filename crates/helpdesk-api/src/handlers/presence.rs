//! Presence query handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use helpdesk_core::error::AppError;
use helpdesk_entity::presence::PresenceState;

use crate::dto::response::{ApiResponse, OnlineUsersResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/presence/online
pub async fn list_online(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OnlineUsersResponse>>, ApiError> {
    let users = state.tracker.online_users().await?;
    Ok(Json(ApiResponse::ok(OnlineUsersResponse {
        count: users.len() as u64,
        users,
    })))
}

/// GET /api/presence/{user_id}
pub async fn get_presence(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PresenceState>>, ApiError> {
    let presence = state
        .tracker
        .presence_of(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No presence recorded for user {user_id}")))?;
    Ok(Json(ApiResponse::ok(presence)))
}
