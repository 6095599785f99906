//! CAPTCHA capability.
//!
//! Forms that talk to the parish API on behalf of anonymous visitors (login,
//! event registration, contact) carry a token produced by a third-party
//! widget. The token is opaque here; it is only checked for presence and then
//! forwarded. Providers differ in where the token lives, not in what it means,
//! so handlers only see this trait.

/// A CAPTCHA widget's state as seen by the server.
pub trait CaptchaChallenge {
    /// The solution token, if the visitor solved the challenge.
    fn token(&self) -> Option<&str>;

    /// Discard the token so the widget must be solved again.
    fn reset(&mut self);

    /// Whether a token is present.
    fn is_solved(&self) -> bool {
        self.token().is_some()
    }
}

/// The submission was rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CaptchaError {
    #[error("Por favor, confirme que você não é um robô.")]
    Missing,
}

/// Token submitted with a form.
///
/// Blank tokens count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedCaptcha {
    token: Option<String>,
}

impl SubmittedCaptcha {
    #[must_use]
    pub fn new(raw: Option<String>) -> Self {
        let token = raw
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());
        Self { token }
    }

    /// Take the token for forwarding, leaving the challenge reset.
    ///
    /// When `required` is false a missing token is fine and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::Missing`] if a token is required and absent.
    pub fn take(&mut self, required: bool) -> Result<Option<String>, CaptchaError> {
        if required && !self.is_solved() {
            return Err(CaptchaError::Missing);
        }
        let token = self.token.take();
        self.reset();
        Ok(token)
    }
}

impl CaptchaChallenge for SubmittedCaptcha {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn reset(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(!SubmittedCaptcha::new(None).is_solved());
        assert!(!SubmittedCaptcha::new(Some("   ".into())).is_solved());
        assert!(SubmittedCaptcha::new(Some("P0_abc".into())).is_solved());
    }

    #[test]
    fn test_required_token_missing_is_rejected() {
        let mut captcha = SubmittedCaptcha::new(None);
        assert_eq!(captcha.take(true), Err(CaptchaError::Missing));
    }

    #[test]
    fn test_take_consumes_token() {
        let mut captcha = SubmittedCaptcha::new(Some("P0_abc".into()));
        assert_eq!(captcha.take(true).unwrap().as_deref(), Some("P0_abc"));
        assert!(!captcha.is_solved());
        assert_eq!(captcha.take(true), Err(CaptchaError::Missing));
    }

    #[test]
    fn test_optional_when_not_configured() {
        let mut captcha = SubmittedCaptcha::new(None);
        assert_eq!(captcha.take(false), Ok(None));
    }
}
