//! Test fixtures and data generators
//!
//! Reusable request payloads and response shapes for integration tests.
//! Response structs are redeclared here rather than imported from the
//! service crate, so a wire-format regression shows up as a test failure
//! instead of silently tracking the refactor.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub forename: String,
    pub surname: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("applicant{suffix}@example.com"),
            password: "CorrectHorse9!".to_string(),
            forename: "Test".to_string(),
            surname: format!("Applicant{suffix}"),
        }
    }
}

/// Sign-in request
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Profile update request
#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    pub forename: String,
    pub surname: String,
}

/// Email change request
#[derive(Debug, Serialize)]
pub struct ChangeEmailRequest {
    pub email: String,
}

/// Password change request
#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn new(current: &str, new: &str) -> Self {
        Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: new.to_string(),
        }
    }
}

/// User envelope, as returned by auth endpoints and /api/me
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: Option<UserBody>,
}

/// User payload
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub forename: String,
    pub surname: String,
}

/// Create application request (wizard submission)
#[derive(Debug, Serialize)]
pub struct CreateApplicationRequest {
    pub name: String,
    pub site_location: String,
    pub application_type: String,
    pub proposal: String,
}

impl CreateApplicationRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Riverside extension {suffix}"),
            site_location: format!("{suffix} Mill Lane, Asham"),
            application_type: "householder".to_string(),
            proposal: "Single-storey rear extension with a green roof.".to_string(),
        }
    }
}

/// Application payload
#[derive(Debug, Deserialize)]
pub struct ApplicationBody {
    pub id: String,
    pub name: String,
    pub site_location: String,
    pub application_type: String,
    pub proposal: String,
    pub status: String,
    pub questions: Vec<bool>,
    pub documents: Vec<DocumentBody>,
    pub progress: ProgressBody,
    pub created_at: String,
    pub updated_at: String,
}

/// Document checklist entry
#[derive(Debug, Deserialize)]
pub struct DocumentBody {
    pub name: String,
    pub uploaded: bool,
    pub required: bool,
}

/// Completion progress payload
#[derive(Debug, Deserialize)]
pub struct ProgressBody {
    pub percent: u8,
}

/// Error response envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
