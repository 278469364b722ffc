//! Authentication extractor
//!
//! Extracts and verifies the access token from the session cookie. Every
//! failure mode (no cookie, bad signature, expired, malformed subject) is
//! the same 401 to the caller.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::cookies::ACCESS_COOKIE;
use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access cookie
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID from the token subject
    pub user_id: Uuid,
    /// Email claim at time of issue
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ACCESS_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(ApiError::AuthRequired)?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt_service().verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            ApiError::AuthRequired
        })?;
        let user_id = claims.user_id().map_err(|_| ApiError::AuthRequired)?;

        Ok(CurrentUser {
            user_id,
            email: claims.email,
        })
    }
}
