use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use super::extract::OptionalJson;
use super::validation::optional_text;
use super::{
    AdvisorDto, ApiError, AppState, CreateAdvisorRequest, CreateAdvisorResponse, RenewRequest,
    RenewResponse, RevokeRequest, SuccessResponse, ValidationResponse,
};
use crate::domain::DayCount;
use crate::services::AdvisorDraft;

pub async fn create_advisor(
    State(state): State<Arc<AppState>>,
    OptionalJson(payload): OptionalJson<CreateAdvisorRequest>,
) -> Result<Json<CreateAdvisorResponse>, ApiError> {
    let draft = AdvisorDraft {
        name: optional_text(payload.nombre),
        email: optional_text(payload.email),
        phone: optional_text(payload.telefono),
        company: optional_text(payload.empresa),
        paid_days: payload.dias_pagados.as_ref().and_then(DayCount::from_json),
    };

    let advisor = state
        .advisors()
        .create(draft)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error creando asesor"))?;

    let url = state.config().server.advisor_url(&advisor.slug);

    Ok(Json(CreateAdvisorResponse {
        success: true,
        message: "Asesor creado correctamente",
        asesor: AdvisorDto::new(advisor, url),
    }))
}

pub async fn list_advisors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdvisorDto>>, ApiError> {
    let advisors = state
        .advisors()
        .list()
        .await
        .map_err(|e| ApiError::from(e).with_context("Error obteniendo asesores"))?;

    let server = &state.config().server;
    let dtos = advisors
        .into_iter()
        .map(|a| {
            let url = server.advisor_url(&a.slug);
            AdvisorDto::new(a, url)
        })
        .collect();

    Ok(Json(dtos))
}

/// Landing page check. Store failures keep the `{valid, error}` shape so the
/// page can render its "unavailable" state.
pub async fn validate_advisor(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.advisors().validate(&slug).await {
        Ok(validation) => Json(ValidationResponse::from(validation)).into_response(),
        Err(e) => {
            error!(slug = %slug, error = %e, "Error validando asesor");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ValidationResponse::invalid("Error validando asesor")),
            )
                .into_response()
        }
    }
}

pub async fn renew_advisor(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    OptionalJson(payload): OptionalJson<RenewRequest>,
) -> Result<Json<RenewResponse>, ApiError> {
    let days = payload.dias.as_ref().and_then(DayCount::from_json);

    let renewal = state
        .advisors()
        .renew(&slug, days)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error renovando asesor"))?;

    Ok(Json(RenewResponse {
        success: true,
        message: "Asesor renovado",
        nueva_expiracion: renewal.new_expiration,
    }))
}

pub async fn revoke_advisor(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    OptionalJson(payload): OptionalJson<RevokeRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .advisors()
        .revoke(&slug, optional_text(payload.razon))
        .await
        .map_err(|e| ApiError::from(e).with_context("Error revocando asesor"))?;

    Ok(Json(SuccessResponse::with_message("Acceso revocado")))
}

pub async fn suspend_advisor(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .advisors()
        .suspend(&slug)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error suspendiendo asesor"))?;

    Ok(Json(SuccessResponse::with_message("Asesor suspendido")))
}

pub async fn activate_advisor(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .advisors()
        .activate(&slug)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error activando asesor"))?;

    Ok(Json(SuccessResponse::with_message("Asesor activado")))
}
