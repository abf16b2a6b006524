//! Response DTOs.

use serde::{Deserialize, Serialize};

use helpdesk_entity::presence::PresenceState;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Basic liveness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Dependency health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the presence store answers.
    pub store: bool,
    /// Whether the broadcast service connection is open.
    pub broadcast_connected: bool,
    /// Whether changes are relayed through the broadcast events API.
    pub broadcast_relay: bool,
    /// Local WebSocket subscribers on the global presence channel.
    pub presence_subscribers: usize,
}

/// Online users listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersResponse {
    /// Number of online users.
    pub count: u64,
    /// Online users, most recently seen first.
    pub users: Vec<PresenceState>,
}
