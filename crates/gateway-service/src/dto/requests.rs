//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Services additionally trim free-text fields before
//! persisting, so a value of spaces cannot sneak past a length rule.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 100, message = "Forename must be 2-100 characters"))]
    pub forename: String,

    #[validate(length(min = 2, max = 100, message = "Surname must be 2-100 characters"))]
    pub surname: String,
}

/// Sign-in request
///
/// Format is deliberately not validated here: legacy accounts must still be
/// able to sign in, and a malformed address fails credential lookup anyway.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Application Requests
// ============================================================================

/// Create application request (final step of the wizard)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 4, max = 200, message = "Name must be 4-200 characters"))]
    pub name: String,

    #[validate(length(min = 4, max = 300, message = "Site location must be 4-300 characters"))]
    pub site_location: String,

    #[validate(length(min = 1, max = 100, message = "Application type is required"))]
    pub application_type: String,

    #[validate(length(min = 10, max = 4000, message = "Proposal must be 10-4000 characters"))]
    pub proposal: String,
}

// ============================================================================
// Settings Requests
// ============================================================================

/// Update profile name request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Forename must be 2-100 characters"))]
    pub forename: String,

    #[validate(length(min = 2, max = 100, message = "Surname must be 2-100 characters"))]
    pub surname: String,
}

/// Change email request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Change password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(
        length(min = 8, max = 72, message = "Password must be 8-72 characters"),
        must_match(other = "confirm_password", message = "Passwords do not match")
    )]
    pub new_password: String,

    pub confirm_password: String,
}
