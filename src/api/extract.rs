//! Request extractors shared by the advisor routes.

use axum::{
    body::Bytes,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use super::{ApiError, AppState};

/// JSON body where an empty body means "all fields absent".
///
/// The admin panel posts to several action endpoints without a body, and
/// malformed JSON must still come back as a JSON error.
#[derive(Debug)]
pub struct OptionalJson<T>(pub T);

impl<S, T> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation_with_detail("Cuerpo inválido", e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::validation_with_detail("JSON inválido", e.to_string()))
    }
}

/// Address of the requesting client.
///
/// Forwarded headers are only honoured when `server.trust_proxy_headers` is
/// set; otherwise the socket peer address is used.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

const UNKNOWN_CLIENT: &str = "unknown";

impl ClientIp {
    fn from_forwarded_headers(parts: &Parts) -> Option<String> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = || {
            parts
                .headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        forwarded.or_else(real_ip).map(ToString::to_string)
    }
}

impl FromRequestParts<Arc<AppState>> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if state.config().server.trust_proxy_headers {
            if let Some(ip) = Self::from_forwarded_headers(parts) {
                return Ok(Self(ip));
            }
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(|| UNKNOWN_CLIENT.to_string(), |ci| ci.0.ip().to_string());

        Ok(Self(peer))
    }
}
