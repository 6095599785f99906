//! Authentication service.
//!
//! Talks to the parish API on behalf of a browser session: the one-shot
//! bootstrap probe, the credential exchange, and logout. Session bookkeeping
//! on this side ([`SessionStore`], the `tower-sessions` entry, the Sentry
//! scope) is updated here too so handlers stay thin.

mod error;

pub use error::{AuthError, INVALID_CREDENTIALS};

use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;
use tracing::{debug, info, instrument, warn};

use paroquia_core::{SubmittedCaptcha, UserRecord};

use crate::api::{Credential, LoginOutcome, LoginRequest, ParishApi};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::session::{ClientHandle, SessionRegistry, SessionStore, keys};

/// Ask the parish API who holds `credential`.
///
/// Every failure (network, status, malformed body) reads as "not logged in".
#[instrument(skip_all, fields(has_credential = credential.is_some()))]
pub async fn probe_session(api: &ParishApi, credential: Option<&Credential>) -> Option<UserRecord> {
    match api.session_probe(credential).await {
        Ok(probe) => probe.into_user(),
        Err(e) => {
            debug!(error = %e, "Session probe failed, treating as logged out");
            None
        }
    }
}

/// Login attempt as submitted by the login form.
#[derive(Debug)]
pub struct LoginAttempt {
    pub email: String,
    pub senha: SecretString,
    pub captcha: SubmittedCaptcha,
}

/// Authentication service.
pub struct AuthService<'a> {
    api: &'a ParishApi,
    captcha_required: bool,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(api: &'a ParishApi, captcha_required: bool) -> Self {
        Self {
            api,
            captcha_required,
        }
    }

    /// Exchange credentials for a backend session.
    ///
    /// The CAPTCHA token is consumed whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Captcha` without calling the API when a token is
    /// required and missing, `AuthError::MissingFields` for blank input, and
    /// `AuthError::Rejected` when the API refuses.
    #[instrument(skip_all, fields(email = %attempt.email))]
    pub async fn authenticate(&self, mut attempt: LoginAttempt) -> Result<LoginOutcome, AuthError> {
        let captcha_token = attempt.captcha.take(self.captcha_required)?;

        let email = attempt.email.trim().to_string();
        if email.is_empty() || attempt.senha.expose_secret().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let request = LoginRequest {
            email,
            senha: attempt.senha,
            captcha_token,
        };
        let outcome = self.api.login(&request).await?;
        info!(user_id = %outcome.user.id, "Login accepted");
        Ok(outcome)
    }
}

/// Record a successful login in the browser session.
///
/// # Errors
///
/// Returns error if the session cannot be written.
pub async fn sign_in(
    session: &Session,
    store: &SessionStore,
    outcome: LoginOutcome,
) -> Result<(), tower_sessions::session::Error> {
    match &outcome.credential {
        Some(credential) => {
            session
                .insert(keys::BACKEND_COOKIE, credential.expose())
                .await?;
        }
        None => {
            session.remove::<String>(keys::BACKEND_COOKIE).await?;
        }
    }
    set_sentry_user(
        &outcome.user.id,
        outcome.user.email.as_ref().map(paroquia_core::Email::as_str),
    );
    store.login(outcome.user);
    Ok(())
}

/// End the browser session.
///
/// The parish API is told first; its failure is logged and otherwise
/// ignored. Local state is always discarded.
pub async fn sign_out(
    api: &ParishApi,
    registry: &SessionRegistry,
    session: &Session,
    client: &ClientHandle,
    credential: Option<&Credential>,
) {
    if let Err(e) = api.logout(credential).await {
        warn!(error = %e, "Parish API logout failed");
    }

    client.store.logout();
    registry.discard(&client.id).await;
    if let Err(e) = session.flush().await {
        warn!(error = %e, "Failed to flush session on logout");
    }
    clear_sentry_user();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;

    fn unreachable_api() -> ParishApi {
        // Port 9 (discard) on localhost: nothing listens there in tests.
        ParishApi::new(
            &Url::parse("http://127.0.0.1:9/api/v1").unwrap(),
            Duration::from_millis(200),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_captcha_rejected_before_network() {
        let api = unreachable_api();
        let service = AuthService::new(&api, true);
        let err = service
            .authenticate(LoginAttempt {
                email: "padre@paroquia.org".into(),
                senha: SecretString::from("s3nha".to_string()),
                captcha: SubmittedCaptcha::new(None),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Captcha(_)));
        assert!(!err.reached_api());
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_locally() {
        let api = unreachable_api();
        let service = AuthService::new(&api, false);
        let err = service
            .authenticate(LoginAttempt {
                email: "  ".into(),
                senha: SecretString::from(String::new()),
                captcha: SubmittedCaptcha::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_unreachable_api_reads_as_logged_out() {
        assert!(probe_session(&unreachable_api(), None).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_api_login_shows_connection_error() {
        let api = unreachable_api();
        let err = AuthService::new(&api, false)
            .authenticate(LoginAttempt {
                email: "padre@paroquia.org".into(),
                senha: SecretString::from("s3nha".to_string()),
                captcha: SubmittedCaptcha::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), crate::api::error::CONNECTION_FAILED);
    }
}
