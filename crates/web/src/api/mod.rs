//! Parish REST API client.
//!
//! Every screen of the site is a thin view over this API. The client is
//! stateless apart from the shared connection pool: the caller passes the
//! backend [`Credential`] of the browser session on each call that needs one.

pub mod credential;
pub mod error;
pub mod resources;

use std::time::Duration;

use axum::http::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned};
use url::Url;

use paroquia_core::EventoId;
use paroquia_core::UserRecord;
use paroquia_core::records::{ContactMessage, DashboardSummary, Inscricao, InscricaoPayload};

use crate::middleware::request_id::{REQUEST_ID_HEADER, RequestId};

pub use credential::Credential;
pub use error::ApiError;
pub use resources::Resource;

/// Result type alias for parish API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Answer of the "who am I" endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionProbe {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl SessionProbe {
    /// The logged-in user, if the API says there is one.
    #[must_use]
    pub fn into_user(self) -> Option<UserRecord> {
        if self.is_authenticated { self.user } else { None }
    }
}

/// Credential exchange request.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub senha: SecretString,
    #[serde(rename = "captchaToken", skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: UserRecord,
}

/// Successful login: the user record plus the backend session cookie.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserRecord,
    pub credential: Option<Credential>,
}

/// Parish REST API client.
#[derive(Clone)]
pub struct ParishApi {
    client: reqwest::Client,
    base: Url,
}

impl ParishApi {
    /// Create a new client rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base: &Url, timeout: Duration) -> ApiResult<Self> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("paroquia-web/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    fn request(&self, method: Method, path: &str, credential: Option<&Credential>) -> ApiResult<RequestBuilder> {
        let url = self.base.join(path)?;
        let mut request = self.client.request(method, url);
        if let Some(value) = credential.and_then(Credential::header_value) {
            request = request.header(COOKIE, value);
        }
        if let Some(id) = RequestId::current() {
            request = request.header(REQUEST_ID_HEADER, id.as_str());
        }
        Ok(request)
    }

    /// Send and reject non-2xx answers.
    async fn send(request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, credential: Option<&Credential>) -> ApiResult<T> {
        let response = Self::send(self.request(Method::GET, path, credential)?).await?;
        Self::decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> ApiResult<()> {
        Self::send(self.request(method, path, credential)?.json(body)).await?;
        Ok(())
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Ask the API who the holder of `credential` is.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-2xx status, or malformed body.
    #[tracing::instrument(skip_all)]
    pub async fn session_probe(&self, credential: Option<&Credential>) -> ApiResult<SessionProbe> {
        self.get_json("auth/me", credential).await
    }

    /// Exchange credentials for a backend session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the API's message when the
    /// credentials are rejected.
    #[tracing::instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginOutcome> {
        let response = Self::send(self.request(Method::POST, "auth/login", None)?.json(request)).await?;
        let credential = Credential::from_set_cookie(response.headers());
        let LoginResponse { user } = Self::decode(response).await?;
        Ok(LoginOutcome { user, credential })
    }

    /// End the backend session.
    ///
    /// # Errors
    ///
    /// Returns error if the API could not be told; the local session is
    /// discarded regardless.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, credential: Option<&Credential>) -> ApiResult<()> {
        Self::send(self.request(Method::POST, "auth/logout", credential)?).await?;
        Ok(())
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// List a collection.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-2xx status, or malformed body.
    #[tracing::instrument(skip_all, fields(resource = R::PATH))]
    pub async fn list<R: Resource>(&self, credential: Option<&Credential>) -> ApiResult<Vec<R::Record>> {
        self.get_json(R::PATH, credential).await
    }

    /// Find one record by listing the collection.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be fetched.
    pub async fn find<R: Resource>(
        &self,
        id: R::Id,
        credential: Option<&Credential>,
    ) -> ApiResult<Option<R::Record>> {
        Ok(self
            .list::<R>(credential)
            .await?
            .into_iter()
            .find(|record| R::id(record) == id))
    }

    /// Create a record.
    ///
    /// # Errors
    ///
    /// Returns error on network failure or non-2xx status.
    #[tracing::instrument(skip_all, fields(resource = R::PATH))]
    pub async fn create<R: Resource>(&self, payload: &R::Payload, credential: Option<&Credential>) -> ApiResult<()> {
        self.send_json(Method::POST, R::PATH, payload, credential).await
    }

    /// Replace a record.
    ///
    /// # Errors
    ///
    /// Returns error on network failure or non-2xx status.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = %id))]
    pub async fn update<R: Resource>(
        &self,
        id: R::Id,
        payload: &R::Payload,
        credential: Option<&Credential>,
    ) -> ApiResult<()> {
        let path = format!("{}/{id}", R::PATH);
        self.send_json(Method::PUT, &path, payload, credential).await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns error on network failure or non-2xx status.
    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = %id))]
    pub async fn delete<R: Resource>(&self, id: R::Id, credential: Option<&Credential>) -> ApiResult<()> {
        let path = format!("{}/{id}", R::PATH);
        Self::send(self.request(Method::DELETE, &path, credential)?).await?;
        Ok(())
    }

    // =========================================================================
    // Event registrations, dashboard, contact
    // =========================================================================

    /// Register a visitor for an event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] 403 when the event filled up in the
    /// meantime.
    #[tracing::instrument(skip_all, fields(evento = %evento))]
    pub async fn register(&self, evento: EventoId, payload: &InscricaoPayload) -> ApiResult<()> {
        let path = format!("eventos/{evento}/inscricao");
        self.send_json(Method::POST, &path, payload, None).await
    }

    /// Registrations of one event.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-2xx status, or malformed body.
    #[tracing::instrument(skip_all, fields(evento = %evento))]
    pub async fn inscricoes(&self, evento: EventoId, credential: Option<&Credential>) -> ApiResult<Vec<Inscricao>> {
        self.get_json(&format!("eventos/{evento}/inscricoes"), credential).await
    }

    /// Back-office dashboard figures for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-2xx status, or malformed body.
    #[tracing::instrument(skip_all)]
    pub async fn dashboard(&self, credential: Option<&Credential>) -> ApiResult<DashboardSummary> {
        self.get_json("dashboard", credential).await
    }

    /// Forward a contact-form message to the parish mailbox.
    ///
    /// # Errors
    ///
    /// Returns error on network failure or non-2xx status.
    #[tracing::instrument(skip_all, fields(email = %message.email))]
    pub async fn send_contact(&self, message: &ContactMessage) -> ApiResult<()> {
        self.send_json(Method::POST, "enviar-email", message, None).await
    }

    /// Whether the API answers HTTP at all.
    pub async fn is_reachable(&self) -> bool {
        match self.request(Method::GET, "auth/me", None) {
            Ok(request) => request.send().await.is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = ParishApi::new(
            &Url::parse("http://localhost:5000/api/v1").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(api.base.join("auth/me").unwrap().as_str(), "http://localhost:5000/api/v1/auth/me");
    }

    #[test]
    fn test_probe_requires_flag_and_user() {
        let probe: SessionProbe = serde_json::from_str(r#"{"is_authenticated":false}"#).unwrap();
        assert!(probe.into_user().is_none());

        let probe: SessionProbe =
            serde_json::from_str(r#"{"is_authenticated":true,"user":null}"#).unwrap();
        assert!(probe.into_user().is_none());

        let probe: SessionProbe = serde_json::from_str(
            r#"{"is_authenticated":true,"user":{"id":1,"nome":"Teste","tipo":"admin"}}"#,
        )
        .unwrap();
        assert!(probe.into_user().unwrap().is_admin());
    }

    #[test]
    fn test_login_body_shape() {
        let request = LoginRequest {
            email: "padre@paroquia.org".into(),
            senha: SecretString::from("s3nha".to_string()),
            captcha_token: Some("tok".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["senha"], "s3nha");
        assert_eq!(json["captchaToken"], "tok");

        let request = LoginRequest {
            captcha_token: None,
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("captchaToken").is_none());
        assert!(!format!("{request:?}").contains("s3nha"));
    }

    mod against_mock {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::*;

        async fn api(server: &MockServer) -> ParishApi {
            let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
            ParishApi::new(&base, Duration::from_secs(2)).unwrap()
        }

        #[tokio::test]
        async fn test_request_id_is_forwarded() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v1/auth/me"))
                .and(header("x-request-id", "lb-0042"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "is_authenticated": false
                })))
                .expect(1)
                .mount(&server)
                .await;

            let api = api(&server).await;
            let mut headers = axum::http::HeaderMap::new();
            headers.insert(REQUEST_ID_HEADER, "lb-0042".parse().unwrap());
            let id = RequestId::from_upstream(&headers).unwrap();
            let probe = id.scope(api.session_probe(None)).await.unwrap();
            assert!(probe.into_user().is_none());

            server.verify().await;
        }

        #[tokio::test]
        async fn test_login_keeps_backend_cookie_and_replays_it() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/v1/auth/login"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("set-cookie", "session=abc; HttpOnly; Path=/")
                        .set_body_json(serde_json::json!({
                            "user": {"id": 7, "nome": "Maria Souza", "tipo": "gestor"}
                        })),
                )
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/api/v1/auth/me"))
                .and(header("cookie", "session=abc"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "is_authenticated": true,
                    "user": {"id": 7, "nome": "Maria Souza", "tipo": "gestor"}
                })))
                .expect(1)
                .mount(&server)
                .await;

            let api = api(&server).await;
            let outcome = api
                .login(&LoginRequest {
                    email: "maria@paroquia.org".into(),
                    senha: SecretString::from("x".to_string()),
                    captcha_token: None,
                })
                .await
                .unwrap();
            assert_eq!(outcome.user.first_name(), "Maria");

            let credential = outcome.credential.unwrap();
            let probe = api.session_probe(Some(&credential)).await.unwrap();
            assert!(probe.into_user().is_some());
        }

        #[tokio::test]
        async fn test_rejection_carries_api_message() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/v1/eventos/3/inscricao"))
                .respond_with(
                    ResponseTemplate::new(403)
                        .set_body_json(serde_json::json!({"error": "Evento lotado"})),
                )
                .mount(&server)
                .await;

            let payload = InscricaoPayload {
                nome: "Ana".into(),
                telefone: "1199".into(),
            };
            let err = api(&server)
                .await
                .register(EventoId::new(3), &payload)
                .await
                .unwrap_err();
            assert_eq!(err.status(), Some(403));
            assert_eq!(err.user_message("fallback"), "Evento lotado");
        }

        #[tokio::test]
        async fn test_find_scans_the_list() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v1/avisos"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {"id": 1, "titulo": "Quermesse", "categoria": "festa", "url": "", "data": "2025-06-01"},
                    {"id": 2, "titulo": "Retiro", "categoria": "retiro", "data": "2025-07-01"}
                ])))
                .mount(&server)
                .await;

            let api = api(&server).await;
            let found = api
                .find::<resources::Avisos>(paroquia_core::AvisoId::new(2), None)
                .await
                .unwrap();
            assert_eq!(found.map(|a| a.titulo), Some("Retiro".to_string()));

            let missing = api
                .find::<resources::Avisos>(paroquia_core::AvisoId::new(9), None)
                .await
                .unwrap();
            assert!(missing.is_none());
        }

        #[tokio::test]
        async fn test_malformed_body() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v1/dashboard"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
                .mount(&server)
                .await;

            let err = api(&server).await.dashboard(None).await.unwrap_err();
            assert!(matches!(err, ApiError::Malformed(_)));
        }
    }
}
