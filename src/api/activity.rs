use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::extract::{ClientIp, OptionalJson};
use super::validation::{optional_text, plan_identifier, quote_amount};
use super::{
    ActivityDto, ApiError, AppState, RecordAccessRequest, RecordQuotationRequest, SuccessResponse,
};
use crate::models::activity::{AccessInput, QuotationInput};

pub async fn record_access(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    ClientIp(ip): ClientIp,
    OptionalJson(payload): OptionalJson<RecordAccessRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let input = AccessInput {
        client_name: optional_text(payload.cliente_nombre),
        client_email: optional_text(payload.cliente_email),
        ip,
    };

    state
        .activity()
        .record_access(&slug, input)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error registrando acceso"))?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn record_quotation(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    ClientIp(ip): ClientIp,
    OptionalJson(payload): OptionalJson<RecordQuotationRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let input = QuotationInput {
        client_name: optional_text(payload.cliente_nombre),
        client_email: optional_text(payload.cliente_email),
        plan1: plan_identifier(payload.plan1.as_ref()),
        plan2: plan_identifier(payload.plan2.as_ref()),
        amount: quote_amount(payload.monto.as_ref()),
        ip,
    };

    state
        .activity()
        .record_quotation(&slug, input)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error registrando cotización"))?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn list_activity(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ActivityDto>>, ApiError> {
    let events = state
        .activity()
        .list(&slug)
        .await
        .map_err(|e| ApiError::from(e).with_context("Error obteniendo actividad"))?;

    Ok(Json(events.into_iter().map(ActivityDto::from).collect()))
}
