//! Process-local presence store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use helpdesk_core::result::AppResult;
use helpdesk_entity::presence::PresenceState;

use crate::store::PresenceStore;

/// In-memory presence store backed by a `DashMap`.
///
/// Each upsert holds the entry lock for its key, so concurrent writes for
/// the same user serialize.
#[derive(Debug, Default)]
pub struct MemoryPresenceStore {
    states: DashMap<Uuid, PresenceState>,
}

impl MemoryPresenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceStore for MemoryPresenceStore {
    async fn upsert(
        &self,
        user_id: Uuid,
        is_online: bool,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceState> {
        let state = self
            .states
            .entry(user_id)
            .and_modify(|existing| existing.apply(is_online, seen_at))
            .or_insert_with(|| PresenceState {
                user_id,
                is_online,
                last_seen_at: seen_at,
            })
            .clone();
        Ok(state)
    }

    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceState>> {
        Ok(self.states.get(&user_id).map(|r| r.value().clone()))
    }

    async fn list_online(&self) -> AppResult<Vec<PresenceState>> {
        let mut online: Vec<PresenceState> = self
            .states
            .iter()
            .filter(|r| r.value().is_online)
            .map(|r| r.value().clone())
            .collect();
        online.sort_by(|a, b| b.last_seen_at.cmp(&a.last_seen_at));
        Ok(online)
    }

    async fn count_online(&self) -> AppResult<u64> {
        Ok(self.states.iter().filter(|r| r.value().is_online).count() as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
