//! Authentication error types.

use thiserror::Error;

use paroquia_core::captcha::CaptchaError;

use crate::api::ApiError;

/// Shown when the API rejects a login without saying why.
pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";

/// Errors that can occur during the credential exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A CAPTCHA is configured and the form carried no token.
    #[error(transparent)]
    Captcha(#[from] CaptchaError),

    /// Email or password left blank.
    #[error("Informe e-mail e senha.")]
    MissingFields,

    /// The parish API refused the credentials or could not be reached.
    #[error("Login rejected: {0}")]
    Rejected(#[from] ApiError),
}

impl AuthError {
    /// Text shown inline on the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Captcha(err) => err.to_string(),
            Self::MissingFields => self.to_string(),
            Self::Rejected(err) => err.user_message(INVALID_CREDENTIALS),
        }
    }

    /// Whether the parish API was contacted at all.
    #[must_use]
    pub const fn reached_api(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
