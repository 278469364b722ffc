//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for audit_log table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
