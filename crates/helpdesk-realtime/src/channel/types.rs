//! Channel type definitions and parsing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed channel identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum ChannelType {
    /// Every presence change.
    PresenceGlobal,
    /// Presence changes of a single user.
    PresenceUser(Uuid),
}

impl ChannelType {
    /// Parses a channel string into a typed channel.
    pub fn parse(channel: &str) -> Option<Self> {
        match channel.split_once(':')? {
            ("presence", "global") => Some(ChannelType::PresenceGlobal),
            ("presence", id) => Uuid::parse_str(id).ok().map(ChannelType::PresenceUser),
            _ => None,
        }
    }

    /// Converts back to a channel string.
    pub fn to_channel_string(&self) -> String {
        match self {
            ChannelType::PresenceGlobal => "presence:global".to_string(),
            ChannelType::PresenceUser(id) => format!("presence:{id}"),
        }
    }

    /// Channel name on the managed broadcast service, which does not accept
    /// `:` in names.
    pub fn to_broadcast_name(&self) -> String {
        match self {
            ChannelType::PresenceGlobal => "helpdesk.presence".to_string(),
            ChannelType::PresenceUser(id) => format!("helpdesk.presence.{id}"),
        }
    }

    /// Channels a presence change of `user_id` is announced on.
    pub fn announcement_targets(user_id: Uuid) -> [ChannelType; 2] {
        [ChannelType::PresenceGlobal, ChannelType::PresenceUser(user_id)]
    }
}
