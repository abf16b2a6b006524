//! Presence store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use helpdesk_core::result::AppResult;
use helpdesk_entity::presence::PresenceState;

/// Persistent storage for per-user presence state.
///
/// Implementations must keep exactly one record per user and must never move
/// `last_seen_at` backwards. The online flag is last-write-wins.
#[async_trait]
pub trait PresenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create or update the user's record and return the stored state.
    async fn upsert(
        &self,
        user_id: Uuid,
        is_online: bool,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceState>;

    /// Find a user's record.
    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceState>>;

    /// All online users, most recently seen first.
    async fn list_online(&self) -> AppResult<Vec<PresenceState>>;

    /// Number of online users.
    async fn count_online(&self) -> AppResult<u64>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
