//! Public contact lookup for the demo landing page.
//!
//! Independent of the advisor store: the profiles live in a JSON object held
//! by an environment variable (`ASESORES_DATA` by default), keyed by profile
//! name.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::{ApiError, AppState};

/// Where the raw profile blob comes from.
pub trait ProfileSource: Send + Sync {
    /// Returns the raw JSON text, or `None` when nothing is configured.
    fn raw(&self) -> Option<String>;

    /// Name reported when the blob is missing.
    fn name(&self) -> &str;
}

/// Reads the blob from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvProfileSource {
    var: String,
}

impl EnvProfileSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl ProfileSource for EnvProfileSource {
    fn raw(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }

    fn name(&self) -> &str {
        &self.var
    }
}

/// Fixed blob, for tests and local demos.
#[derive(Debug, Clone)]
pub struct StaticProfileSource {
    name: String,
    blob: Option<String>,
}

impl StaticProfileSource {
    pub fn new(name: impl Into<String>, blob: Option<String>) -> Self {
        Self {
            name: name.into(),
            blob,
        }
    }
}

impl ProfileSource for StaticProfileSource {
    fn raw(&self) -> Option<String> {
        self.blob.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0} no configurado")]
    NotConfigured(String),

    #[error("Error al procesar solicitud")]
    Malformed(#[from] serde_json::Error),

    #[error("Asesor no encontrado")]
    NotFound,
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => Self::NotFound(err.to_string()),
            LookupError::NotConfigured(_) => Self::configuration(err.to_string(), None),
            LookupError::Malformed(ref cause) => {
                Self::configuration(err.to_string(), Some(cause.to_string()))
            }
        }
    }
}

/// Contact card returned to the landing page. Fields absent from the
/// stored profile are omitted.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct LandingProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callmebot_apikey: Option<Value>,
}

impl LandingProfile {
    fn from_value(profile: &Value) -> Self {
        let field = |name: &str| profile.get(name).filter(|v| !v.is_null()).cloned();
        Self {
            nombre: field("nombre"),
            telefono: field("telefono"),
            correo: field("correo"),
            callmebot_apikey: field("callmebot_apikey"),
        }
    }
}

/// Finds `key` (or its underscore spelling) in the blob supplied by `source`.
pub fn lookup_profile(
    source: &dyn ProfileSource,
    key: &str,
) -> Result<LandingProfile, LookupError> {
    let raw = source
        .raw()
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| LookupError::NotConfigured(source.name().to_string()))?;

    let profiles: Value = serde_json::from_str(&raw)?;

    let alias = key.replace('-', "_");
    [key, alias.as_str()]
        .into_iter()
        .filter_map(|k| profiles.get(k))
        .find(|profile| !profile.is_null())
        .map(LandingProfile::from_value)
        .ok_or(LookupError::NotFound)
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// `GET`/`POST /api/asesores/prueba-landing`
pub async fn lookup(State(state): State<Arc<AppState>>) -> Response {
    let key = &state.config().landing.profile_key;
    let response = match lookup_profile(state.profile_source.as_ref(), key) {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    };
    with_cors(response)
}

/// `OPTIONS /api/asesores/prueba-landing`
pub async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(blob: Option<&str>) -> StaticProfileSource {
        StaticProfileSource::new("ASESORES_DATA", blob.map(ToString::to_string))
    }

    #[test]
    fn test_lookup_by_key_and_alias() {
        let blob = r#"{"prueba-landing": {"nombre": "Ana", "telefono": "+56911111111",
            "correo": "ana@example.com", "callmebot_apikey": "123"}}"#;
        let profile = lookup_profile(&source(Some(blob)), "prueba-landing").unwrap();
        assert_eq!(profile.nombre, Some(json!("Ana")));
        assert_eq!(profile.callmebot_apikey, Some(json!("123")));

        let blob = r#"{"prueba_landing": {"nombre": "Beto"}}"#;
        let profile = lookup_profile(&source(Some(blob)), "prueba-landing").unwrap();
        assert_eq!(profile.nombre, Some(json!("Beto")));
        assert_eq!(profile.correo, None);
    }

    #[test]
    fn test_lookup_errors() {
        assert!(matches!(
            lookup_profile(&source(None), "prueba-landing"),
            Err(LookupError::NotConfigured(ref name)) if name == "ASESORES_DATA"
        ));
        assert!(matches!(
            lookup_profile(&source(Some("")), "prueba-landing"),
            Err(LookupError::NotConfigured(_))
        ));
        assert!(matches!(
            lookup_profile(&source(Some("{not json")), "prueba-landing"),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            lookup_profile(&source(Some(r#"{"otro": {}}"#)), "prueba-landing"),
            Err(LookupError::NotFound)
        ));
    }

    #[test]
    fn test_not_configured_message_names_variable() {
        let err = LookupError::NotConfigured("ASESORES_DATA".to_string());
        assert_eq!(err.to_string(), "ASESORES_DATA no configurado");
    }
}
