use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use super::AppState;
use super::validation::landing_slug;

/// Serves files from `server.public_dir`. Single-segment paths that match no
/// file fall through to `index.html`, which renders the advisor landing page
/// for that slug.
pub async fn serve_public(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let public_dir = PathBuf::from(&state.config().server.public_dir);
    let is_landing = landing_slug(req.uri().path()).is_some();

    let response = match ServeDir::new(&public_dir).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    };

    if response.status() != StatusCode::NOT_FOUND || !is_landing {
        return response;
    }

    match ServeFile::new(public_dir.join("index.html"))
        .oneshot(Request::new(Body::empty()))
        .await
    {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}
