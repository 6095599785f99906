//! Backend session credential.
//!
//! The parish API identifies a logged-in user by its own session cookie. At
//! login the `Set-Cookie` headers of the response are reduced to their
//! `name=value` pairs and kept server-side; every later call on behalf of
//! that browser session sends them back as a single `Cookie` header.

use axum::http::{HeaderMap, HeaderValue, header::SET_COOKIE};
use secrecy::{ExposeSecret, SecretString};

/// Cookie header value for the parish API. `Debug` is redacted.
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a stored `Cookie` header value.
    #[must_use]
    pub fn new(cookie_header: impl Into<String>) -> Self {
        Self(SecretString::from(cookie_header.into()))
    }

    /// Collect the `name=value` part of every `Set-Cookie` header.
    ///
    /// Attributes (`Path`, `HttpOnly`, `Expires`, ...) are dropped. Returns
    /// `None` when the response set no usable cookie.
    #[must_use]
    pub fn from_set_cookie(headers: &HeaderMap) -> Option<Self> {
        let pairs: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.split_once('=').is_some_and(|(name, _)| !name.trim().is_empty()))
            .collect();

        if pairs.is_empty() {
            return None;
        }
        Some(Self::new(pairs.join("; ")))
    }

    /// Value to store in the browser session.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Header value to send; `None` if the stored text is not a valid header.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        let mut value = HeaderValue::from_str(self.0.expose_secret()).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_strips_cookie_attributes() {
        let credential = Credential::from_set_cookie(&headers(&[
            "session=abc.def; Expires=Thu, 01 Jan 2026 00:00:00 GMT; HttpOnly; Path=/",
        ]))
        .unwrap();
        assert_eq!(credential.expose(), "session=abc.def");
    }

    #[test]
    fn test_joins_multiple_cookies() {
        let credential = Credential::from_set_cookie(&headers(&[
            "session=abc; Path=/",
            "remember_token=1|xyz; HttpOnly",
        ]))
        .unwrap();
        assert_eq!(credential.expose(), "session=abc; remember_token=1|xyz");
    }

    #[test]
    fn test_no_usable_cookie() {
        assert!(Credential::from_set_cookie(&HeaderMap::new()).is_none());
        assert!(Credential::from_set_cookie(&headers(&["garbage", "=novalue"])).is_none());
    }

    #[test]
    fn test_debug_redacts_value() {
        let credential = Credential::new("session=topsecret");
        assert!(!format!("{credential:?}").contains("topsecret"));
        assert!(credential.header_value().unwrap().is_sensitive());
    }
}
