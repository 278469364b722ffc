//! Session cookie construction
//!
//! Both credentials ride in `HttpOnly`, `SameSite=Lax`, `Path=/` cookies,
//! `Secure` in production. The raw refresh value exists only here and in the
//! client's cookie jar; the server stores its hash. Clearing a cookie reuses
//! the same attributes with an empty value and `Max-Age=0` so browsers
//! reliably drop it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gateway_common::AppConfig;
use gateway_service::AuthTokens;
use time::Duration;

/// Name of the access-token cookie
pub const ACCESS_COOKIE: &str = "app_session";

/// Name of the refresh-token cookie
pub const REFRESH_COOKIE: &str = "app_refresh";

fn build(name: &'static str, value: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

/// Access-token cookie carrying a signed JWT
pub fn access_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    build(
        ACCESS_COOKIE,
        token,
        config.auth.access_token_expiry,
        config.app.env.is_production(),
    )
}

/// Refresh-token cookie carrying the raw opaque secret
pub fn refresh_cookie(config: &AppConfig, raw: String) -> Cookie<'static> {
    build(
        REFRESH_COOKIE,
        raw,
        config.auth.refresh_token_expiry,
        config.app.env.is_production(),
    )
}

/// Attach both session cookies for a freshly issued token pair
pub fn apply_session(jar: CookieJar, config: &AppConfig, tokens: &AuthTokens) -> CookieJar {
    jar.add(access_cookie(config, tokens.access.clone()))
        .add(refresh_cookie(config, tokens.refresh_raw.clone()))
}

/// Expire both session cookies
pub fn clear_session(jar: CookieJar, config: &AppConfig) -> CookieJar {
    let secure = config.app.env.is_production();
    jar.add(build(ACCESS_COOKIE, String::new(), 0, secure))
        .add(build(REFRESH_COOKIE, String::new(), 0, secure))
}
