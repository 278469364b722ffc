//! Refresh session service
//!
//! Issues, rotates, and revokes the opaque refresh tokens backing long-lived
//! sign-ins. Only the SHA-256 hash of a token is ever stored; the raw value
//! exists in the cookie and nowhere else.

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use gateway_common::auth::{generate_refresh_token, hash_refresh_token};
use gateway_core::entities::{ClientMeta, RefreshSession};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A freshly established refresh session together with its raw token
///
/// The raw value is destined for the refresh cookie and must not be logged.
pub struct IssuedSession {
    pub raw: String,
    pub session: RefreshSession,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("raw", &"<redacted>")
            .field("session", &self.session.id)
            .finish()
    }
}

/// Refresh session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a brand-new refresh session for a user
    #[instrument(skip(self, client))]
    pub async fn issue(&self, user_id: Uuid, client: &ClientMeta) -> ServiceResult<IssuedSession> {
        let token = generate_refresh_token();
        let expires_at = Utc::now() + Duration::seconds(self.ctx.refresh_ttl_seconds());
        let session = RefreshSession::new(user_id, token.hash, expires_at, client.clone());

        self.ctx.session_repo().create(&session).await?;

        debug!(session_id = %session.id, "Refresh session issued");
        Ok(IssuedSession {
            raw: token.raw,
            session,
        })
    }

    /// Rotate a presented refresh token: revoke it and issue a successor
    ///
    /// Every way this can miss — unknown token, expired session, or losing a
    /// concurrent rotation race — comes back as `Ok(None)`, meaning "not
    /// authenticated". A replayed token lands in the unknown-token case
    /// because rotation already revoked its row. Only storage faults are
    /// errors.
    #[instrument(skip(self, raw, client))]
    pub async fn rotate(
        &self,
        raw: &str,
        client: &ClientMeta,
    ) -> ServiceResult<Option<IssuedSession>> {
        let hash = hash_refresh_token(raw);

        let Some(existing) = self.ctx.session_repo().find_active_by_hash(&hash).await? else {
            debug!("Rotation failed: no active session for presented token");
            return Ok(None);
        };

        if existing.is_expired(Utc::now()) {
            debug!(session_id = %existing.id, "Rotation failed: session expired");
            return Ok(None);
        }

        let token = generate_refresh_token();
        let expires_at = Utc::now() + Duration::seconds(self.ctx.refresh_ttl_seconds());
        let replacement =
            RefreshSession::new(existing.user_id, token.hash, expires_at, client.clone());

        if !self
            .ctx
            .session_repo()
            .supersede(existing.id, &replacement)
            .await?
        {
            debug!(session_id = %existing.id, "Rotation failed: lost race to concurrent rotation");
            return Ok(None);
        }

        info!(
            old_session = %existing.id,
            new_session = %replacement.id,
            "Refresh session rotated"
        );
        Ok(Some(IssuedSession {
            raw: token.raw,
            session: replacement,
        }))
    }

    /// Revoke the session behind a presented refresh token
    ///
    /// Idempotent: an unknown or already-revoked token is a silent no-op.
    #[instrument(skip(self, raw))]
    pub async fn revoke(&self, raw: &str) -> ServiceResult<()> {
        let hash = hash_refresh_token(raw);
        self.ctx.session_repo().revoke_by_hash(&hash).await?;
        Ok(())
    }
}
