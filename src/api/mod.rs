use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::Clock;
use crate::services::{ActivityService, AdvisorService};
use crate::state::SharedState;

mod activity;
mod advisors;
mod assets;
mod error;
pub mod extract;
pub mod landing;
mod observability;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use landing::{EnvProfileSource, ProfileSource, StaticProfileSource};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub profile_source: Arc<dyn ProfileSource>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn advisors(&self) -> &Arc<dyn AdvisorService> {
        &self.shared.advisor_service
    }

    #[must_use]
    pub fn activity(&self) -> &Arc<dyn ActivityService> {
        &self.shared.activity_service
    }
}

/// Wires the landing lookup to the environment variable named in the config.
#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let source = Arc::new(EnvProfileSource::new(
        shared.config.landing.data_env_var.clone(),
    ));
    create_app_state_with_source(shared, prometheus_handle, source)
}

#[must_use]
pub fn create_app_state_with_source(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
    profile_source: Arc<dyn ProfileSource>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        profile_source,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn create_app_state_with_clock(
    config: Config,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_clock(config, clock).await?);
    Ok(create_app_state(shared, None))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/health", get(system::health))
        .route("/asesores", get(advisors::list_advisors))
        .route("/asesores/crear", post(advisors::create_advisor))
        .route("/asesores/{slug}", get(advisors::validate_advisor))
        .route(
            "/asesores/{slug}/registrar-acceso",
            post(activity::record_access),
        )
        .route(
            "/asesores/{slug}/registrar-cotizacion",
            post(activity::record_quotation),
        )
        .route("/asesores/{slug}/actividad", get(activity::list_activity))
        .route("/asesores/{slug}/renovar", post(advisors::renew_advisor))
        .route("/asesores/{slug}/revocar", post(advisors::revoke_advisor))
        .route("/asesores/{slug}/suspender", post(advisors::suspend_advisor))
        .route("/asesores/{slug}/activar", post(advisors::activate_advisor));

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    // The landing lookup sits outside the CORS layer: it answers its own
    // preflight with a fixed header set.
    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .layer(
            cors_layer
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .route(
            "/api/asesores/prueba-landing",
            get(landing::lookup)
                .post(landing::lookup)
                .options(landing::preflight),
        )
        .fallback(assets::serve_public)
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
