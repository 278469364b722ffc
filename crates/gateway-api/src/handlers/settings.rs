//! Account settings handlers
//!
//! Profile, email, and password updates plus soft account deletion, all
//! scoped to the authenticated caller.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use gateway_service::{
    AccountService, ChangeEmailRequest, ChangePasswordRequest, UpdateProfileRequest, UserEnvelope,
};

use crate::cookies;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Update the caller's display name
///
/// PATCH /api/settings/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let service = AccountService::new(state.service_context());
    let updated = service.update_profile(user.user_id, request).await?;
    Ok(Json(UserEnvelope::from(updated)))
}

/// Change the caller's email address
///
/// PATCH /api/settings/email
pub async fn update_email(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangeEmailRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let service = AccountService::new(state.service_context());
    let updated = service.update_email(user.user_id, request).await?;
    Ok(Json(UserEnvelope::from(updated)))
}

/// Change the caller's password after verifying the current one
///
/// PATCH /api/settings/password
pub async fn update_password(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AccountService::new(state.service_context());
    service.update_password(user.user_id, request).await?;
    Ok(NoContent)
}

/// Soft-delete the caller's account
///
/// DELETE /api/settings/account
///
/// Revokes every refresh session and clears both cookies, so the response
/// itself ends the browser session.
pub async fn delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AccountService::new(state.service_context());
    service.delete_account(user.user_id).await?;

    Ok((cookies::clear_session(jar, state.config()), NoContent))
}
