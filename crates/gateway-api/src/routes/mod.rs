//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{applications, auth, health, settings, users};
use crate::state::AppState;

/// Create the main API router (health is mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes, mounted at the root rather than under /api
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(session_routes())
        .merge(application_routes())
        .merge(settings_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/refresh", post(auth::refresh))
}

/// Session introspection
fn session_routes() -> Router<AppState> {
    Router::new().route("/me", get(users::current_user))
}

/// Planning application routes
fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(applications::list_applications))
        .route("/applications", post(applications::create_application))
        .route("/applications/:id", get(applications::get_application))
        .route("/applications/:id", delete(applications::delete_application))
}

/// Account settings routes
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings/profile", patch(settings::update_profile))
        .route("/settings/email", patch(settings::update_email))
        .route("/settings/password", patch(settings::update_password))
        .route("/settings/account", delete(settings::delete_account))
}
