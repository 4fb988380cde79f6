use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// `GET /api/health`: liveness plus a store round trip.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.store().ping().await.map_err(|e| {
        ApiError::database(format!("{e:#}")).with_context("Base de datos no disponible")
    })?;

    let asesores = state
        .store()
        .count_advisors()
        .await
        .map_err(|e| ApiError::database(format!("{e:#}")))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        asesores,
    }))
}
