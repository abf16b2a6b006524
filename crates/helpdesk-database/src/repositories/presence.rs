//! Presence repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_entity::presence::PresenceState;

use crate::store::PresenceStore;

/// Single-statement upsert. `GREATEST` keeps `last_seen_at` monotonic when
/// concurrent writes land out of order.
const UPSERT_SQL: &str = r#"
    INSERT INTO presence_states (user_id, is_online, last_seen_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (user_id) DO UPDATE
    SET is_online = EXCLUDED.is_online,
        last_seen_at = GREATEST(presence_states.last_seen_at, EXCLUDED.last_seen_at),
        updated_at = NOW()
    RETURNING user_id, is_online, last_seen_at
"#;

/// PostgreSQL-backed presence store.
#[derive(Debug, Clone)]
pub struct PresenceRepository {
    pool: PgPool,
}

impl PresenceRepository {
    /// Create a new presence repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PresenceStore for PresenceRepository {
    async fn upsert(
        &self,
        user_id: Uuid,
        is_online: bool,
        seen_at: DateTime<Utc>,
    ) -> AppResult<PresenceState> {
        sqlx::query_as::<_, PresenceState>(UPSERT_SQL)
            .bind(user_id)
            .bind(is_online)
            .bind(seen_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to upsert presence state", e)
            })
    }

    async fn find(&self, user_id: Uuid) -> AppResult<Option<PresenceState>> {
        sqlx::query_as::<_, PresenceState>(
            "SELECT user_id, is_online, last_seen_at FROM presence_states WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find presence state", e))
    }

    async fn list_online(&self) -> AppResult<Vec<PresenceState>> {
        sqlx::query_as::<_, PresenceState>(
            "SELECT user_id, is_online, last_seen_at FROM presence_states \
             WHERE is_online ORDER BY last_seen_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list online users", e))
    }

    async fn count_online(&self) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM presence_states WHERE is_online")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count online users", e)
                })?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
