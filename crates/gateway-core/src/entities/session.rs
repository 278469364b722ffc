//! Refresh session entity - one issued long-lived credential

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Client metadata captured when a session is issued or rotated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Refresh session entity.
///
/// Stores only the SHA-256 hash of the raw secret; the raw value lives in the
/// client's cookie and is never persisted. `replaced_by` is an audit
/// back-reference to the session that superseded this one on rotation - it is
/// never an ownership edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub replaced_by: Option<Uuid>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Create a new session for a user from a token hash and expiry
    #[must_use]
    pub fn new(
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
        client: ClientMeta,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            revoked_at: None,
            replaced_by: None,
            ip: client.ip,
            user_agent: client.user_agent,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the session has been revoked
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if the session has passed its expiry
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Check if the session can still be rotated (not revoked and not expired)
    #[inline]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}
