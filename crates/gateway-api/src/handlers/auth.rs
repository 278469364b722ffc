//! Authentication handlers
//!
//! Endpoints for registration, sign-in, sign-out, and refresh-token
//! exchange. Successful register/sign-in/refresh responses carry both
//! session cookies; sign-out clears them.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use gateway_service::{AuthService, RegisterRequest, SignInRequest, UserEnvelope};

use crate::cookies;
use crate::extractors::{ClientInfo, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account and sign it in
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(CookieJar, Created<Json<UserEnvelope>>)> {
    let service = AuthService::new(state.service_context());
    let (user, tokens) = service.register(request, &client).await?;

    let jar = cookies::apply_session(jar, state.config(), &tokens);
    Ok((jar, Created(Json(UserEnvelope::from(user)))))
}

/// Sign in with email and password
///
/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiResult<(CookieJar, Json<UserEnvelope>)> {
    let service = AuthService::new(state.service_context());
    let (user, tokens) = service.sign_in(request, &client).await?;

    let jar = cookies::apply_session(jar, state.config(), &tokens);
    Ok((jar, Json(UserEnvelope::from(user))))
}

/// Sign out, revoking the presented refresh token
///
/// POST /api/auth/sign-out
///
/// Always 204: revocation failures are logged and swallowed so a client can
/// always sign out locally, and both cookies are cleared regardless.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    let refresh = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let service = AuthService::new(state.service_context());
    if let Err(e) = service.sign_out(refresh.as_deref()).await {
        warn!(error = %e, "Failed to revoke refresh session on sign-out");
    }

    (cookies::clear_session(jar, state.config()), NoContent)
}

/// Exchange the refresh cookie for a fresh token pair
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<UserEnvelope>)> {
    let raw = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::AuthRequired)?;

    let service = AuthService::new(state.service_context());
    let Some((user, tokens)) = service.refresh(&raw, &client).await? else {
        return Err(ApiError::AuthRequired);
    };

    let jar = cookies::apply_session(jar, state.config(), &tokens);
    Ok((jar, Json(UserEnvelope::from(user))))
}
