//! Public pages: registration, contact form, list views.

#![allow(clippy::unwrap_used)]

use paroquia_integration_tests::{TestApp, anonymous, api_path, body};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn retiro(registered: u32) -> serde_json::Value {
    json!({
        "id": 5,
        "titulo": "Retiro de Jovens",
        "tipo": "espiritualidade",
        "local": "Casa de Retiros",
        "tipo_vagas": "limitada",
        "numero_vagas": 2,
        "data": "2030-05-01",
        "horario": "19:00:00",
        "registered_count": registered
    })
}

#[tokio::test]
async fn test_registration_redirects_back_with_notice() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    app.mock_list("eventos", json!([retiro(1)])).await;
    Mock::given(method("POST"))
        .and(path(api_path("eventos/5/inscricao")))
        .and(body_json(json!({ "nome": "Ana", "telefone": "11 99999-0000" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&app.api)
        .await;

    let response = app
        .post_form(
            "/eventos/5/inscricao",
            &[("nome", "Ana"), ("telefone", "11 99999-0000")],
        )
        .await;

    assert_eq!(response.url().path(), "/eventos");
    assert_eq!(response.url().query(), Some("inscrito=5"));
    let page = body(response).await;
    assert!(page.contains("Inscrição realizada com sucesso!"));
    assert!(page.contains("1 vaga(s) restante(s)"));

    app.api.verify().await;
}

#[tokio::test]
async fn test_full_event_refuses_registration_locally() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    app.mock_list("eventos", json!([retiro(2)])).await;
    Mock::given(method("POST"))
        .and(path(api_path("eventos/5/inscricao")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.api)
        .await;

    let page = body(app.get("/eventos").await).await;
    assert!(page.contains("Vagas esgotadas"));
    assert!(!page.contains(r#"action="/eventos/5/inscricao""#));

    let response = app
        .post_form("/eventos/5/inscricao", &[("nome", "Ana"), ("telefone", "1199")])
        .await;
    assert!(body(response).await.contains("As vagas para este evento já estão esgotadas."));

    app.api.verify().await;
}

#[tokio::test]
async fn test_registration_for_unknown_event_is_not_found() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    app.mock_list("eventos", json!([retiro(0)])).await;

    let response = app
        .post_form("/eventos/99/inscricao", &[("nome", "Ana"), ("telefone", "1199")])
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_without_captcha_never_reaches_api() {
    let app = TestApp::builder().with_captcha().spawn().await;
    app.mock_probe(anonymous()).await;
    Mock::given(method("GET"))
        .and(path(api_path("eventos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([retiro(0)])))
        .expect(0)
        .mount(&app.api)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("eventos/5/inscricao")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.api)
        .await;

    let response = app
        .post_form("/eventos/5/inscricao", &[("nome", "Ana"), ("telefone", "1199")])
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(body(response).await.contains("confirme que você não é um robô"));

    app.api.verify().await;
}

#[tokio::test]
async fn test_registration_shows_api_outage_inline() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    Mock::given(method("GET"))
        .and(path(api_path("eventos")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.api)
        .await;

    let response = app
        .post_form("/eventos/5/inscricao", &[("nome", "Ana"), ("telefone", "1199")])
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let page = body(response).await;
    assert!(page.contains("Não foi possível concluir a inscrição."));
    assert!(page.contains(r#"href="/eventos""#));
}

#[tokio::test]
async fn test_registration_keeps_category_filter() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    app.mock_list("eventos", json!([retiro(0)])).await;
    Mock::given(method("POST"))
        .and(path(api_path("eventos/5/inscricao")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&app.api)
        .await;

    let page = body(app.get("/eventos?tipo=espiritualidade").await).await;
    assert!(page.contains(r#"<input type="hidden" name="tipo" value="espiritualidade">"#));

    // A rejected form stays on the filtered list.
    let page = body(
        app.post_form(
            "/eventos/5/inscricao",
            &[("nome", ""), ("telefone", "1199"), ("tipo", "espiritualidade")],
        )
        .await,
    )
    .await;
    assert!(page.contains(r#"<input type="hidden" name="tipo" value="espiritualidade">"#));

    let response = app
        .post_form(
            "/eventos/5/inscricao",
            &[("nome", "Ana"), ("telefone", "1199"), ("tipo", "espiritualidade")],
        )
        .await;
    assert_eq!(response.url().query(), Some("tipo=espiritualidade&inscrito=5"));
}

#[tokio::test]
async fn test_counter_after_registration_is_fresh() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    // Before the registration lands the list has one spot left; afterwards none.
    Mock::given(method("GET"))
        .and(path(api_path("eventos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([retiro(1)])))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&app.api)
        .await;
    app.mock_list("eventos", json!([retiro(2)])).await;
    Mock::given(method("POST"))
        .and(path(api_path("eventos/5/inscricao")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&app.api)
        .await;

    // First fetch fills the list, the second is the capacity check.
    assert!(body(app.get("/eventos").await).await.contains("1 vaga(s) restante(s)"));
    let page = body(
        app.post_form("/eventos/5/inscricao", &[("nome", "Ana"), ("telefone", "1199")])
            .await,
    )
    .await;
    assert!(page.contains("Inscrição realizada com sucesso!"));
    assert!(page.contains("Vagas esgotadas"));
}

#[tokio::test]
async fn test_contact_requires_captcha_when_configured() {
    let app = TestApp::builder().with_captcha().spawn().await;
    app.mock_probe(anonymous()).await;
    Mock::given(method("POST"))
        .and(path(api_path("enviar-email")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&app.api)
        .await;

    let form = [
        ("nome", "Lúcia"),
        ("email", "lucia@exemplo.com"),
        ("assunto", "Batizado"),
        ("mensagem", "Gostaria de agendar."),
    ];
    let page = body(app.post_form("/contatos", &form).await).await;
    assert!(page.contains("confirme que você não é um robô"));
    // The visitor's text survives the rejection.
    assert!(page.contains("Gostaria de agendar."));

    app.api.verify().await;
}

#[tokio::test]
async fn test_contact_message_is_forwarded() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    Mock::given(method("POST"))
        .and(path(api_path("enviar-email")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&app.api)
        .await;

    let form = [
        ("nome", "Lúcia"),
        ("email", "lucia@exemplo.com"),
        ("telefone", ""),
        ("assunto", "Batizado"),
        ("mensagem", "Gostaria de agendar."),
    ];
    let page = body(app.post_form("/contatos", &form).await).await;
    assert!(page.contains("Mensagem enviada! Responderemos em breve."));

    app.api.verify().await;
}

#[tokio::test]
async fn test_schedule_grouped_by_weekday() {
    let app = TestApp::spawn().await;
    app.mock_probe(anonymous()).await;
    app.mock_list(
        "horarios",
        json!([
            { "id": 1, "dia": "Segunda", "titulo": "Missa", "horario": "07:00:00", "local": "Matriz" },
            { "id": 2, "dia": "Domingo", "titulo": "Missa", "horario": "10:00:00", "local": "Matriz" }
        ]),
    )
    .await;

    let page = body(app.get("/horarios").await).await;
    let domingo = page.find("Domingo").unwrap();
    let segunda = page.find("Segunda").unwrap();
    assert!(domingo < segunda);
    assert!(page.contains("10h00"));
}
