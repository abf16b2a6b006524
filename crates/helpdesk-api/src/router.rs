//! Route definitions for the helpdesk presence API.
//!
//! REST routes are mounted under `/api`, the WebSocket stream under `/ws`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and the request logging middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(presence_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws/presence", get(handlers::ws::presence_stream))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth event intake
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/events", post(handlers::auth::receive_event))
}

/// Presence queries
fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/presence/online", get(handlers::presence::list_online))
        .route("/presence/{user_id}", get(handlers::presence::get_presence))
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
