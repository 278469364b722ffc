//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use gateway_core::entities::{Application, User};
use gateway_core::progress::compute_progress;

use super::responses::{ApplicationResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            forename: user.forename.clone(),
            surname: user.surname.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Application Mappers
// ============================================================================

/// Progress is computed at mapping time; it is never stored.
impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id,
            name: application.name.clone(),
            site_location: application.site_location.clone(),
            application_type: application.application_type.clone(),
            proposal: application.proposal.clone(),
            status: application.status,
            site_boundary: application.site_boundary.clone(),
            action_plan: application.action_plan.clone(),
            questions: application.questions.clone(),
            documents: application.documents.clone(),
            progress: compute_progress(application),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self::from(&application)
    }
}
