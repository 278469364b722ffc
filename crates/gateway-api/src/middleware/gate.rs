//! Access gate for protected page prefixes
//!
//! Sits in front of routing and guards configured path prefixes (the
//! dashboard by default). A request with a valid access cookie passes
//! straight through. Without one, the gate tries a single refresh-token
//! rotation: on success the request proceeds and the response carries a
//! fresh cookie pair, so an expired access token never bounces a browser
//! that still holds a live refresh token. Anything else is a temporary
//! redirect to the sign-in page with the original path in `next`.

use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use gateway_service::{AuthService, AuthTokens};

use crate::cookies;
use crate::extractors::client_meta_from_headers;
use crate::state::AppState;

/// Middleware guarding the protected prefixes
pub async fn access_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !is_protected(&path, &state.config().gate.protected_prefixes) {
        return next.run(request).await;
    }

    if let Some(cookie) = jar.get(cookies::ACCESS_COOKIE) {
        if state.jwt_service().verify(cookie.value()).is_ok() {
            return next.run(request).await;
        }
    }

    match rotate_refresh(&state, &jar, request.headers()).await {
        Some(tokens) => {
            let mut response = next.run(request).await;
            attach_session(&mut response, &state, tokens);
            response
        }
        None => deny(&state, &path),
    }
}

fn is_protected(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

/// Attempt one refresh-token rotation for this request
///
/// Takes the header map rather than the whole request so the future stays
/// `Send` (`axum::body::Body` is not `Sync`, so `&Request` is not `Send`).
async fn rotate_refresh(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Option<AuthTokens> {
    let raw = jar.get(cookies::REFRESH_COOKIE)?.value().to_string();
    let client = client_meta_from_headers(headers);

    let service = AuthService::new(state.service_context());
    match service.refresh(&raw, &client).await {
        Ok(Some((_, tokens))) => Some(tokens),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Refresh rotation failed in access gate");
            None
        }
    }
}

/// Append both session cookies to the downstream response
fn attach_session(response: &mut Response, state: &AppState, tokens: AuthTokens) {
    let config = state.config();
    let pair = [
        cookies::access_cookie(config, tokens.access),
        cookies::refresh_cookie(config, tokens.refresh_raw),
    ];

    for cookie in pair {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Skipping unencodable session cookie"),
        }
    }
}

fn deny(state: &AppState, path: &str) -> Response {
    let sign_in = &state.config().gate.sign_in_path;
    debug!(path, "Unauthenticated request redirected to sign-in");
    Redirect::temporary(&format!("{sign_in}?next={path}")).into_response()
}
