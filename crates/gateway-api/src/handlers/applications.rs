//! Planning application handlers
//!
//! CRUD over the caller's own applications. Every route requires a valid
//! access cookie; lookups are scoped to the owner, so another user's
//! application id behaves exactly like a missing one.

use axum::{extract::State, Json};

use gateway_service::{ApplicationResponse, ApplicationService, CreateApplicationRequest};

use crate::extractors::{CurrentUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List the caller's applications, newest first
///
/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let applications = service.list(user.user_id).await?;
    Ok(Json(applications))
}

/// Create an application with wizard defaults
///
/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateApplicationRequest>,
) -> ApiResult<Created<Json<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let application = service.create(user.user_id, request).await?;
    Ok(Created(Json(application)))
}

/// Fetch one of the caller's applications
///
/// GET /api/applications/{id}
pub async fn get_application(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApplicationResponse>> {
    let service = ApplicationService::new(state.service_context());
    let application = service.get(user.user_id, id).await?;
    Ok(Json(application))
}

/// Delete one of the caller's applications
///
/// DELETE /api/applications/{id}
pub async fn delete_application(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = ApplicationService::new(state.service_context());
    service.delete(user.user_id, id).await?;
    Ok(NoContent)
}
