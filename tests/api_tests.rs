use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use chrono::{TimeZone, Utc};
use colmena::config::Config;
use colmena::domain::ManualClock;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;
    config
}

async fn spawn_app() -> Router {
    let state = colmena::api::create_app_state_from_config(test_config(), None)
        .await
        .expect("Failed to create app state");
    colmena::api::router(state)
}

async fn spawn_app_with_clock(clock: Arc<ManualClock>) -> Router {
    let state = colmena::api::create_app_state_with_clock(test_config(), clock)
        .await
        .expect("Failed to create app state");
    colmena::api::router(state)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_empty(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn advisor_payload(name: &str) -> Value {
    json!({
        "nombre": name,
        "email": "juan@example.com",
        "telefono": "+56 9 1234 5678",
        "empresa": "Isapre Norte",
        "dias_pagados": 30
    })
}

async fn create_advisor(app: &Router, name: &str) -> Value {
    let response = post_json(app, "/api/asesores/crear", &advisor_payload(name)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_create_advisor_allocates_unique_slugs() {
    let app = spawn_app().await;

    let first = create_advisor(&app, "Juan Pérez").await;
    assert_eq!(first["success"], true);
    assert_eq!(first["message"], "Asesor creado correctamente");
    assert_eq!(first["asesor"]["url_slug"], "juan-perez");
    assert_eq!(
        first["asesor"]["url"],
        "https://tuplanisapre.vercel.app/juan-perez"
    );
    assert_eq!(first["asesor"]["estado"], "activo");
    assert_eq!(first["asesor"]["accesos_total"], 0);
    assert_eq!(first["asesor"]["clientes_unicos"], json!([]));

    let second = create_advisor(&app, "Juan Pérez").await;
    assert_eq!(second["asesor"]["url_slug"], "juan-perez-1");

    let third = create_advisor(&app, "  JUAN   PÉREZ ").await;
    assert_eq!(third["asesor"]["url_slug"], "juan-perez-2");

    let list = body_json(get(&app, "/api/asesores").await).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_advisor_validation() {
    let app = spawn_app().await;

    let mut payload = advisor_payload("Ana Soto");
    payload.as_object_mut().unwrap().remove("telefono");
    let response = post_json(&app, "/api/asesores/crear", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Faltan datos requeridos");

    let mut payload = advisor_payload("Ana Soto");
    payload["dias_pagados"] = json!(0);
    let response = post_json(&app, "/api/asesores/crear", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_empty(&app, "/api/asesores/crear").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/asesores/crear")
                .header("content-type", "application/json")
                .body(Body::from("{\"nombre\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "JSON inválido");
    assert!(body["detalle"].is_string());

    // Day counts sent as strings by the admin form are accepted.
    let mut payload = advisor_payload("Ana Soto");
    payload["dias_pagados"] = json!("15");
    let response = post_json(&app, "/api/asesores/crear", &payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["asesor"]["dias_pagados"], 15);
}

#[tokio::test]
async fn test_validate_advisor_states() {
    let app = spawn_app().await;

    let body = body_json(get(&app, "/api/asesores/nadie").await).await;
    assert_eq!(body, json!({"valid": false, "error": "Asesor no encontrado"}));

    create_advisor(&app, "María José").await;

    let body = body_json(get(&app, "/api/asesores/maria-jose").await).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["asesor"]["nombre"], "María José");
    assert_eq!(body["asesor"]["empresa"], "Isapre Norte");
    assert!(body["asesor"].get("url_slug").is_none());

    let response = post_empty(&app, "/api/asesores/maria-jose/suspender").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": true, "message": "Asesor suspendido"})
    );

    let body = body_json(get(&app, "/api/asesores/maria-jose").await).await;
    assert_eq!(body, json!({"valid": false, "error": "Acceso suspendido"}));

    let response = post_empty(&app, "/api/asesores/maria-jose/activar").await;
    assert_eq!(
        body_json(response).await["message"],
        "Asesor activado"
    );

    let body = body_json(get(&app, "/api/asesores/maria-jose").await).await;
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_unknown_slug_returns_not_found() {
    let app = spawn_app().await;

    for action in ["suspender", "activar", "revocar", "registrar-acceso"] {
        let response = post_empty(&app, &format!("/api/asesores/fantasma/{action}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{action}");
        assert_eq!(body_json(response).await["error"], "Asesor no encontrado");
    }

    let response = post_json(
        &app,
        "/api/asesores/fantasma/renovar",
        &json!({"dias": 10}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        &app,
        "/api/asesores/fantasma/registrar-cotizacion",
        &json!({"cliente_nombre": "Ana", "plan1": "A", "monto": 1000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(get(&app, "/api/asesores/fantasma/actividad").await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_renew_requires_days() {
    let app = spawn_app().await;
    create_advisor(&app, "Pedro").await;

    let response = post_json(&app, "/api/asesores/pedro/renovar", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Especifica días");

    let response = post_json(&app, "/api/asesores/pedro/renovar", &json!({"dias": "abc"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Days are checked before the slug is looked up.
    let response = post_empty(&app, "/api/asesores/fantasma/renovar").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revoke_uses_default_reason() {
    let app = spawn_app().await;
    create_advisor(&app, "Lucía").await;

    let response = post_empty(&app, "/api/asesores/lucia/revocar").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": true, "message": "Acceso revocado"})
    );

    let list = body_json(get(&app, "/api/asesores").await).await;
    let advisor = &list[0];
    assert_eq!(advisor["estado"], "revocado");
    assert!(advisor["fecha_cancelacion"].is_string());
    assert_eq!(advisor["razon_cancelacion"], "Revocado por administrador");

    let body = body_json(get(&app, "/api/asesores/lucia").await).await;
    assert_eq!(body["error"], "Acceso revocado");

    create_advisor(&app, "Tomás").await;
    let response = post_json(
        &app,
        "/api/asesores/tomas/revocar",
        &json!({"razon": "Impago"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get(&app, "/api/asesores").await).await;
    assert_eq!(list[1]["razon_cancelacion"], "Impago");
}

#[tokio::test]
async fn test_activity_list_is_capped_and_newest_first() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    ));
    let app = spawn_app_with_clock(clock.clone()).await;
    create_advisor(&app, "Rosa").await;

    for i in 0..150 {
        clock.advance(chrono::Duration::seconds(1));
        let response = post_json(
            &app,
            "/api/asesores/rosa/registrar-acceso",
            &json!({"cliente_nombre": format!("cliente-{i}")}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let events = body_json(get(&app, "/api/asesores/rosa/actividad").await).await;
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 100);
    assert_eq!(events[0]["cliente_nombre"], "cliente-149");
    assert_eq!(events[99]["cliente_nombre"], "cliente-50");
    assert!(events.iter().all(|e| e["tipo"] == "acceso"));

    let list = body_json(get(&app, "/api/asesores").await).await;
    assert_eq!(list[0]["accesos_total"], 150);
}

#[tokio::test]
async fn test_record_quotation() {
    let app = spawn_app().await;
    create_advisor(&app, "Carlos").await;

    let response = post_json(
        &app,
        "/api/asesores/carlos/registrar-cotizacion",
        &json!({
            "cliente_nombre": "Ana",
            "cliente_email": "ana@example.com",
            "plan1": 42,
            "plan2": "PLAN-B",
            "monto": "99.5"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let events = body_json(get(&app, "/api/asesores/carlos/actividad").await).await;
    let event = &events[0];
    assert_eq!(event["tipo"], "cotizacion");
    assert_eq!(event["plan1"], "42");
    assert_eq!(event["plan2"], "PLAN-B");
    assert_eq!(event["monto"], 99.5);
    assert_eq!(event["cliente_email"], "ana@example.com");

    let list = body_json(get(&app, "/api/asesores").await).await;
    assert_eq!(list[0]["cotizaciones_generadas"], 1);
    assert_eq!(list[0]["accesos_total"], 0);
    assert_eq!(list[0]["clientes_unicos"], json!(["ana@example.com"]));
}

#[tokio::test]
async fn test_record_access_defaults() {
    let app = spawn_app().await;
    create_advisor(&app, "Elena").await;

    let response = post_empty(&app, "/api/asesores/elena/registrar-acceso").await;
    assert_eq!(response.status(), StatusCode::OK);

    let events = body_json(get(&app, "/api/asesores/elena/actividad").await).await;
    assert_eq!(events[0]["cliente_nombre"], "anónimo");
    assert_eq!(events[0]["cliente_email"], Value::Null);
    assert_eq!(events[0]["ip"], "unknown");
    assert!(events[0].get("plan1").is_none());

    let list = body_json(get(&app, "/api/asesores").await).await;
    assert!(list[0]["ultimo_acceso"].is_string());
    assert_eq!(list[0]["clientes_unicos"], json!(["unknown"]));
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = spawn_app().await;
    create_advisor(&app, "Sofía").await;

    let response = get(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["asesores"], 1);

    let response = get(&app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_landing_fallback_serves_index() {
    let public_dir =
        std::env::temp_dir().join(format!("colmena-public-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&public_dir).unwrap();
    std::fs::write(public_dir.join("index.html"), "<html>landing</html>").unwrap();
    std::fs::write(public_dir.join("admin.html"), "<html>admin</html>").unwrap();

    let mut config = test_config();
    config.server.public_dir = public_dir.display().to_string();
    let state = colmena::api::create_app_state_from_config(config, None)
        .await
        .unwrap();
    let app = colmena::api::router(state);

    for uri in ["/juan-perez", "/", "/admin.html"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = get(&app, "/juan-perez").await;
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<html>landing</html>");

    for uri in ["/favicon.ico", "/a/b", "/api", "/api/nada"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    std::fs::remove_dir_all(&public_dir).ok();
}
