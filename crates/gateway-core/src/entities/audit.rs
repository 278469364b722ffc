//! Audit log entry - append-only record of sensitive account actions

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One audit record. Write-only from this system's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Action recorded when an account is soft deleted
    pub const ACCOUNT_SOFT_DELETE: &'static str = "account.soft_delete";
    /// Action recorded when a user renames themselves
    pub const ACCOUNT_UPDATE_NAME: &'static str = "account.update_name";

    /// Create a new audit entry for a user action
    #[must_use]
    pub fn new(user_id: Uuid, action: &str, metadata: Option<JsonValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action: action.to_string(),
            metadata,
            created_at: Utc::now(),
        }
    }
}
