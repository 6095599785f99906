//! Parish API error classification.

use serde::Deserialize;
use thiserror::Error;

/// Message shown when the parish API cannot be reached.
pub const CONNECTION_FAILED: &str = "Erro de conexão com o servidor.";

/// Message shown when the parish API answers with something unreadable.
pub const MALFORMED_RESPONSE: &str = "Resposta inesperada do servidor.";

/// Errors that can occur when talking to the parish API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got an HTTP answer (connect error, timeout).
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The API answered 2xx with a body that does not decode.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// `{ "error": "..." }` body the API sends with failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

impl ApiError {
    /// Build a status error from a failed response body.
    ///
    /// The API's `{ error }` text is kept when present; anything else leaves
    /// the message empty so callers can pick their own fallback.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .map(|m| m.trim().to_string())
            .unwrap_or_default();
        Self::Status { status, message }
    }

    /// HTTP status the API answered with, if it answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show inline next to the form or list that failed.
    ///
    /// `fallback` is used when the API rejected the request without saying
    /// why.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Status { .. } => fallback.to_string(),
            Self::Network(_) | Self::Endpoint(_) => CONNECTION_FAILED.to_string(),
            Self::Malformed(_) => MALFORMED_RESPONSE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_api_text() {
        let err = ApiError::from_status(401, r#"{"error":"Credenciais inválidas."}"#);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message("fallback"), "Credenciais inválidas.");
    }

    #[test]
    fn test_status_without_text_uses_fallback() {
        for body in ["", "<html>502</html>", r#"{"message":"x"}"#, r#"{"error":"  "}"#] {
            let err = ApiError::from_status(500, body);
            assert_eq!(err.user_message("Falhou."), "Falhou.", "body {body}");
        }
    }

    #[test]
    fn test_malformed_message() {
        let err = ApiError::Malformed("expected value".into());
        assert_eq!(err.user_message("x"), MALFORMED_RESPONSE);
        assert_eq!(err.status(), None);
    }
}
