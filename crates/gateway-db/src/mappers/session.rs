//! Refresh session entity <-> model mapper

use gateway_core::entities::RefreshSession;

use crate::models::RefreshSessionModel;

/// Convert RefreshSessionModel to RefreshSession entity
impl From<RefreshSessionModel> for RefreshSession {
    fn from(model: RefreshSessionModel) -> Self {
        RefreshSession {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
            replaced_by: model.replaced_by,
            ip: model.ip,
            user_agent: model.user_agent,
            last_used_at: model.last_used_at,
            created_at: model.created_at,
        }
    }
}
