//! Outbound presence message definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent to presence subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A user came online.
    UserOnline {
        /// User ID.
        user_id: Uuid,
        /// Display name.
        name: String,
        /// Stored `last_seen_at` after the change.
        timestamp: DateTime<Utc>,
    },
    /// A user went offline.
    UserOffline {
        /// User ID.
        user_id: Uuid,
        /// Display name.
        name: String,
        /// Stored `last_seen_at` after the change.
        timestamp: DateTime<Utc>,
    },
}

impl OutboundMessage {
    /// Event name used on the wire.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::UserOnline { .. } => "user_online",
            Self::UserOffline { .. } => "user_offline",
        }
    }

    /// The user the message is about.
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::UserOnline { user_id, .. } | Self::UserOffline { user_id, .. } => *user_id,
        }
    }
}
