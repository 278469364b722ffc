//! Current-user handler

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use gateway_service::{AuthService, UserEnvelope};

use crate::cookies;
use crate::response::ApiResult;
use crate::state::AppState;

/// Resolve the signed-in user from the access cookie
///
/// GET /api/me
///
/// Never 401: an absent, invalid, or expired token (or a deleted user)
/// yields `{"user": null}` with 200 so clients can probe session state
/// without tripping error handling.
pub async fn current_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<UserEnvelope>> {
    let token = jar
        .get(cookies::ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let service = AuthService::new(state.service_context());
    let user = service.current_user(token.as_deref()).await?;

    Ok(Json(UserEnvelope::new(user)))
}
