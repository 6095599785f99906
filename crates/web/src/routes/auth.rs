//! Authentication route handlers.
//!
//! Login posts email, password and, when a provider is configured, the
//! CAPTCHA token. A rejected login re-renders the form with the reason and a
//! fresh widget; the consumed token is never sent back.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::filters;
use crate::middleware::{Client, OptionalUser};
use crate::routes::SiteNav;
use crate::services::auth::{self, AuthService, LoginAttempt};
use crate::services::{CaptchaWidget, captcha};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: SiteNav,
    pub email: String,
    pub error: Option<String>,
    pub captcha: Option<CaptchaWidget>,
}

impl LoginTemplate {
    fn new(state: &AppState, user: Option<paroquia_core::UserRecord>) -> Self {
        Self {
            nav: SiteNav::new("auth", user),
            email: String::new(),
            error: None,
            captcha: CaptchaWidget::from_config(state.config().captcha.as_ref()),
        }
    }
}

/// Display the login page.
pub async fn login_page(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> LoginTemplate {
    LoginTemplate::new(&state, user)
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    Client(client): Client,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let config = state.config().captcha.as_ref();
    let attempt = LoginAttempt {
        email: form.email.clone(),
        senha: SecretString::from(form.senha),
        captcha: captcha::submitted(config, &form.extra),
    };

    match AuthService::new(state.api(), config.is_some())
        .authenticate(attempt)
        .await
    {
        Ok(outcome) => {
            auth::sign_in(&session, &client.store, outcome).await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => {
            if e.reached_api() {
                warn!(error = %e, "Login failed");
            }
            let mut template = LoginTemplate::new(&state, client.store.snapshot().user().cloned());
            template.email = form.email;
            template.error = Some(e.user_message());
            Ok(template.into_response())
        }
    }
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, Client(client): Client, session: Session) -> Redirect {
    auth::sign_out(
        state.api(),
        state.sessions(),
        &session,
        &client,
        client.credential.as_ref(),
    )
    .await;
    Redirect::to("/auth")
}
