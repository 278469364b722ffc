//! Client metadata extractor
//!
//! Captures the caller's IP and user agent for refresh-session records.
//! Extraction never fails; absent headers simply leave the fields empty.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use gateway_core::entities::ClientMeta;

/// Client metadata from request headers
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientMeta);

/// Read client metadata out of a header map.
///
/// `X-Forwarded-For` may carry a proxy chain; only the first (client) entry
/// is kept.
pub fn client_meta_from_headers(headers: &HeaderMap) -> ClientMeta {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    ClientMeta { ip, user_agent }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_meta_from_headers(&parts.headers)))
    }
}
