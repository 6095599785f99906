//! Integration tests for Paróquia Web.
//!
//! Every test gets its own server on an ephemeral port and its own fake
//! parish API ([`wiremock`]), so tests run in parallel with no shared state.
//! The client keeps cookies like a browser would.
//!
//! ```bash
//! cargo test -p paroquia-integration-tests
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use paroquia_web::config::{CaptchaConfig, CaptchaProvider, WebConfig};
use paroquia_web::state::AppState;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix of the fake parish API.
pub const API_PREFIX: &str = "/api/v1";

/// Site key used when a test enables the CAPTCHA.
pub const TEST_SITE_KEY: &str = "10000000-ffff-ffff-ffff-000000000001";

/// A running site plus the fake API behind it.
pub struct TestApp {
    pub addr: SocketAddr,
    pub api: MockServer,
    /// Cookie-keeping client that follows redirects.
    pub client: Client,
}

/// Knobs a test may turn before the server starts.
#[derive(Debug, Clone)]
pub struct TestAppBuilder {
    guard_wait: Duration,
    captcha: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            guard_wait: Duration::from_secs(3),
            captcha: false,
        }
    }
}

impl TestAppBuilder {
    #[must_use]
    pub const fn guard_wait(mut self, wait: Duration) -> Self {
        self.guard_wait = wait;
        self
    }

    /// Gate login, registration and contact behind hCaptcha.
    #[must_use]
    pub const fn with_captcha(mut self) -> Self {
        self.captcha = true;
        self
    }

    /// Start the fake API and the site.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn(self) -> TestApp {
        let api = MockServer::start().await;
        let api_url = Url::parse(&format!("{}{API_PREFIX}", api.uri())).expect("mock server URI");

        let mut config = WebConfig::new(api_url, "http://127.0.0.1");
        config.rate_limit = false;
        config.guard_wait = self.guard_wait;
        config.api_timeout = Duration::from_secs(5);
        if self.captcha {
            config.captcha = Some(CaptchaConfig {
                provider: CaptchaProvider::HCaptcha,
                site_key: TEST_SITE_KEY.to_string(),
            });
        }

        let state = AppState::new(config).expect("Failed to build application state");
        let app = paroquia_web::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        TestApp { addr, api, client }
    }
}

impl TestApp {
    #[must_use]
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    /// Site with default settings.
    pub async fn spawn() -> Self {
        Self::builder().spawn().await
    }

    /// Absolute URL of a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Answer the session probe with `body` for the rest of the test.
    pub async fn mock_probe(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(api_path("auth/me")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.api)
            .await;
    }

    /// Answer `GET {resource}` with `body`.
    pub async fn mock_list(&self, resource: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(api_path(resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.api)
            .await;
    }

    /// GET a site path, following redirects.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST a form to a site path, following redirects.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }
}

/// Full path of an API endpoint on the mock server.
#[must_use]
pub fn api_path(endpoint: &str) -> String {
    format!("{API_PREFIX}/{endpoint}")
}

/// Probe answer for a browser nobody logged in from.
#[must_use]
pub fn anonymous() -> Value {
    json!({ "is_authenticated": false, "user": null })
}

/// Probe answer for a logged-in user.
#[must_use]
pub fn authenticated(user: &Value) -> Value {
    json!({ "is_authenticated": true, "user": user })
}

/// User record with the elevated role.
#[must_use]
pub fn admin_user() -> Value {
    json!({ "id": 1, "nome": "Teste", "email": "teste@paroquia.org", "tipo": "admin" })
}

/// User record with the standard role.
#[must_use]
pub fn gestor_user() -> Value {
    json!({ "id": 2, "nome": "Joana Lima", "email": "joana@paroquia.org", "tipo": "gestor" })
}

/// Read a response body, panicking on failure.
///
/// # Panics
///
/// Panics if the body cannot be read.
pub async fn body(response: reqwest::Response) -> String {
    response.text().await.expect("Failed to read body")
}
