//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use gateway_core::entities::{ApplicationStatus, DocumentRequirement};
use gateway_core::progress::ProgressReport;

// ============================================================================
// User Responses
// ============================================================================

/// Authenticated user as exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub forename: String,
    pub surname: String,
}

/// Envelope for endpoints that answer with "who is signed in"
///
/// `/api/me` serializes `{"user": null}` for anonymous callers rather than
/// failing, so the same shape covers both outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: Option<UserResponse>,
}

impl UserEnvelope {
    pub fn new(user: Option<UserResponse>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl From<UserResponse> for UserEnvelope {
    fn from(user: UserResponse) -> Self {
        Self { user: Some(user) }
    }
}

// ============================================================================
// Application Responses
// ============================================================================

/// Application with its computed completion progress
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub name: String,
    pub site_location: String,
    pub application_type: String,
    pub proposal: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_boundary: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_plan: Option<JsonValue>,
    pub questions: Vec<bool>,
    pub documents: Vec<DocumentRequirement>,
    pub progress: ProgressReport,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
