//! Back-office pages when the parish API misbehaves.

#![allow(clippy::unwrap_used)]

use paroquia_integration_tests::{TestApp, admin_user, api_path, authenticated, body};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const OUTAGE: &str = "Banco de dados indisponível.";

async fn failing(app: &TestApp, resource: &str) {
    Mock::given(method("GET"))
        .and(path(api_path(resource)))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": OUTAGE })))
        .mount(&app.api)
        .await;
}

#[tokio::test]
async fn test_record_pages_show_api_failure_inline() {
    let app = TestApp::spawn().await;
    app.mock_probe(authenticated(&admin_user())).await;
    failing(&app, "agenda").await;

    for page in ["/admin/agenda/3/editar", "/admin/agenda/3/excluir"] {
        let response = app.get(page).await;
        assert_eq!(response.status(), StatusCode::OK, "{page}");
        assert_eq!(response.url().path(), page);
        let html = body(response).await;
        assert!(html.contains(OUTAGE), "{page}");
        assert!(html.contains(r#"href="/admin/agenda""#), "{page}");
    }
}

#[tokio::test]
async fn test_registration_list_shows_api_failure_inline() {
    let app = TestApp::spawn().await;
    app.mock_probe(authenticated(&admin_user())).await;
    failing(&app, "eventos").await;

    let response = app.get("/admin/eventos/5/inscritos").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await.contains(OUTAGE));
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let app = TestApp::spawn().await;
    app.mock_probe(authenticated(&admin_user())).await;
    app.mock_list("agenda", json!([])).await;

    let response = app.get("/admin/agenda/3/editar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
