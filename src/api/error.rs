use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::services::{ActivityError, AdvisorError};

const GENERIC_STORE_MESSAGE: &str = "Error interno del servidor";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError {
        message: String,
        detail: Option<String>,
    },

    ConfigurationError {
        message: String,
        detail: Option<String>,
    },

    /// Store failure. `context` is what the caller sees, `message` is only logged.
    DatabaseError {
        context: String,
        message: String,
    },

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ValidationError { message, .. } => write!(f, "Validation error: {message}"),
            Self::ConfigurationError { message, .. } => {
                write!(f, "Configuration error: {message}")
            }
            Self::DatabaseError { context, message } => {
                write!(f, "Database error ({context}): {message}")
            }
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            Self::ValidationError { message, detail } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    detalle: detail,
                },
            ),
            Self::ConfigurationError { message, detail } => {
                tracing::error!("Configuration error: {} {:?}", message, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: message,
                        detalle: detail,
                    },
                )
            }
            Self::DatabaseError { context, message } => {
                tracing::error!("{}: {}", context, message);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(context))
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(GENERIC_STORE_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::Validation(msg) => Self::validation(msg),
            AdvisorError::NotFound(_) => Self::advisor_not_found(),
            AdvisorError::Database(msg) => Self::database(msg),
        }
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::NotFound(_) => Self::advisor_not_found(),
            ActivityError::Database(msg) => Self::database(msg),
        }
    }
}

impl ApiError {
    pub fn advisor_not_found() -> Self {
        Self::NotFound("Asesor no encontrado".to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError {
            message: msg.into(),
            detail: None,
        }
    }

    pub fn validation_with_detail(msg: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ValidationError {
            message: msg.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn configuration(msg: impl Into<String>, detail: Option<String>) -> Self {
        Self::ConfigurationError {
            message: msg.into(),
            detail,
        }
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::DatabaseError {
            context: GENERIC_STORE_MESSAGE.to_string(),
            message: msg.into(),
        }
    }

    /// Replaces the caller-facing message of a store failure; other variants
    /// pass through untouched.
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::DatabaseError { message, .. } => Self::DatabaseError {
                context: context.to_string(),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_hide_details() {
        let err = ApiError::from(AdvisorError::Database("disk I/O error".to_string()))
            .with_context("Error creando asesor");

        match err {
            ApiError::DatabaseError { context, message } => {
                assert_eq!(context, "Error creando asesor");
                assert_eq!(message, "disk I/O error");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_context_does_not_touch_client_errors() {
        let err =
            ApiError::from(AdvisorError::missing_days()).with_context("Error renovando asesor");
        assert!(matches!(
            err,
            ApiError::ValidationError { ref message, .. } if message == "Especifica días"
        ));

        let err = ApiError::from(ActivityError::NotFound("nadie".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
