//! Auth event intake.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use helpdesk_realtime::AuthEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/events
///
/// Dispatches a login/logout notification from the authentication
/// subsystem. Malformed bodies answer 400 in the error envelope; listener
/// failures are returned to the caller.
pub async fn receive_event(
    State(state): State<AppState>,
    payload: Result<Json<AuthEvent>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(event) = payload?;
    state.dispatcher.dispatch(&event).await?;
    Ok(StatusCode::NO_CONTENT)
}
