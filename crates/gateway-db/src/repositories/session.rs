//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gateway_core::entities::RefreshSession;
use gateway_core::traits::{RepoResult, SessionRepository};

use crate::models::RefreshSessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SessionRepository
///
/// Rotation goes through [`SessionRepository::supersede`], which revokes the
/// old row and inserts its replacement in one transaction. A presented token
/// whose row is already revoked simply fails the lookup, so replay after
/// rotation needs no separate bookkeeping.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a session row on any executor (pool or open transaction)
async fn insert_session<'e, E>(executor: E, session: &RefreshSession) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r"
        INSERT INTO refresh_sessions
            (id, user_id, token_hash, expires_at, revoked_at, replaced_by,
             ip, user_agent, last_used_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ",
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.token_hash)
    .bind(session.expires_at)
    .bind(session.revoked_at)
    .bind(session.replaced_by)
    .bind(&session.ip)
    .bind(&session.user_agent)
    .bind(session.last_used_at)
    .bind(session.created_at)
    .execute(executor)
    .await
    .map(|_| ())
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session))]
    async fn create(&self, session: &RefreshSession) -> RepoResult<()> {
        insert_session(&self.pool, session)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, token_hash))]
    async fn find_active_by_hash(&self, token_hash: &str) -> RepoResult<Option<RefreshSession>> {
        let result = sqlx::query_as::<_, RefreshSessionModel>(
            r"
            SELECT id, user_id, token_hash, expires_at, revoked_at, replaced_by,
                   ip, user_agent, last_used_at, created_at
            FROM refresh_sessions
            WHERE token_hash = $1 AND revoked_at IS NULL
            ",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshSession::from))
    }

    #[instrument(skip(self, replacement))]
    async fn supersede(&self, old_id: Uuid, replacement: &RefreshSession) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Insert the replacement first so the back-reference on the old row
        // has a target.
        insert_session(&mut *tx, replacement)
            .await
            .map_err(map_db_error)?;

        let updated = sqlx::query(
            r"
            UPDATE refresh_sessions
            SET revoked_at = NOW(), replaced_by = $2, last_used_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(old_id)
        .bind(replacement.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Another request rotated this session between lookup and here.
        // Roll back so the losing replacement never becomes redeemable.
        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(true)
    }

    #[instrument(skip(self, token_hash))]
    async fn revoke_by_hash(&self, token_hash: &str) -> RepoResult<()> {
        // Idempotent: revoking an unknown or already-revoked token is a no-op.
        sqlx::query(
            r"
            UPDATE refresh_sessions
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL
            ",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_sessions
            SET revoked_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
