//! # helpdesk-api
//!
//! HTTP API layer built on Axum.
//!
//! Receives auth events from the authentication subsystem, exposes presence
//! queries, streams presence changes over WebSocket and applies the CORS
//! policy from configuration.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
