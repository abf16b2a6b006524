//! Presence tracker: the single writer of users' online state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use helpdesk_core::result::AppResult;
use helpdesk_database::store::PresenceStore;
use helpdesk_entity::presence::PresenceState;
use helpdesk_entity::user::User;

use crate::bridge::PresenceBroadcaster;
use crate::channel::ChannelType;
use crate::message::OutboundMessage;

/// Tracks presence state for all users.
///
/// `set_user_online` and `set_user_offline` are the only operations that
/// change a user's online flag. Both refresh `last_seen_at`, persist, then
/// announce the change. Store failures are returned; announcement failures
/// are logged and swallowed.
#[derive(Debug, Clone)]
pub struct PresenceTracker {
    store: Arc<dyn PresenceStore>,
    broadcaster: Arc<dyn PresenceBroadcaster>,
}

impl PresenceTracker {
    /// Create a tracker over a store and a broadcaster.
    pub fn new(store: Arc<dyn PresenceStore>, broadcaster: Arc<dyn PresenceBroadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// Mark a user as online.
    pub async fn set_user_online(&self, user: &User) -> AppResult<()> {
        self.record(user, true).await
    }

    /// Mark a user as offline.
    pub async fn set_user_offline(&self, user: &User) -> AppResult<()> {
        self.record(user, false).await
    }

    /// A user's stored presence, if any.
    pub async fn presence_of(&self, user_id: Uuid) -> AppResult<Option<PresenceState>> {
        self.store.find(user_id).await
    }

    /// All online users, most recently seen first.
    pub async fn online_users(&self) -> AppResult<Vec<PresenceState>> {
        self.store.list_online().await
    }

    /// Number of online users.
    pub async fn online_count(&self) -> AppResult<u64> {
        self.store.count_online().await
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Presence store health check failed");
                false
            }
        }
    }

    async fn record(&self, user: &User, is_online: bool) -> AppResult<()> {
        let state = self.store.upsert(user.id, is_online, Utc::now()).await?;

        info!(
            user_id = %user.id,
            is_online = state.is_online,
            last_seen_at = %state.last_seen_at,
            "Presence updated"
        );

        let message = if state.is_online {
            OutboundMessage::UserOnline {
                user_id: user.id,
                name: user.name.clone(),
                timestamp: state.last_seen_at,
            }
        } else {
            OutboundMessage::UserOffline {
                user_id: user.id,
                name: user.name.clone(),
                timestamp: state.last_seen_at,
            }
        };

        for channel in ChannelType::announcement_targets(user.id) {
            if let Err(e) = self.broadcaster.publish(&channel, &message).await {
                warn!(
                    channel = %channel.to_channel_string(),
                    user_id = %user.id,
                    error = %e,
                    "Failed to announce presence change"
                );
            }
        }

        Ok(())
    }
}
