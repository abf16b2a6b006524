//! Presence state record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The stored presence of one user. There is exactly one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PresenceState {
    /// User ID (primary key).
    pub user_id: Uuid,
    /// Whether the user is currently online.
    pub is_online: bool,
    /// Last time the user logged in or out. Never decreases.
    pub last_seen_at: DateTime<Utc>,
}

impl PresenceState {
    /// Applies a presence write: the flag is replaced, the timestamp only
    /// moves forward.
    pub fn apply(&mut self, is_online: bool, seen_at: DateTime<Utc>) {
        self.is_online = is_online;
        if seen_at > self.last_seen_at {
            self.last_seen_at = seen_at;
        }
    }
}
