//! Application database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for applications table
///
/// Wizard collections live in jsonb columns: `questions` is an array of
/// booleans, `documents` an array of requirement objects, and `weights`
/// an optional object of per-section overrides. Malformed json degrades
/// in the mapper rather than failing the row.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub site_location: String,
    pub application_type: String,
    pub proposal: String,
    pub status: String,
    pub site_boundary: Option<JsonValue>,
    pub action_plan: Option<JsonValue>,
    pub questions: JsonValue,
    pub documents: JsonValue,
    pub weights: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
