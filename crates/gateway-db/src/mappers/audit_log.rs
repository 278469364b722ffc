//! Audit entry entity <-> model mapper

use gateway_core::entities::AuditEntry;

use crate::models::AuditLogModel;

/// Convert AuditLogModel to AuditEntry entity
impl From<AuditLogModel> for AuditEntry {
    fn from(model: AuditLogModel) -> Self {
        AuditEntry {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            metadata: model.metadata,
            created_at: model.created_at,
        }
    }
}
