//! CAPTCHA widget wiring.
//!
//! The provider's script fills a hidden field named after the provider
//! (`h-captcha-response`, `g-recaptcha-response`, `cf-turnstile-response`).
//! Gated forms flatten their unknown fields into a map and pick the token
//! out here.

use std::collections::HashMap;

use paroquia_core::SubmittedCaptcha;

use crate::config::CaptchaConfig;

/// What a template needs to render the widget.
#[derive(Debug, Clone)]
pub struct CaptchaWidget {
    pub script_url: &'static str,
    pub widget_class: &'static str,
    pub site_key: String,
}

impl CaptchaWidget {
    #[must_use]
    pub fn from_config(config: Option<&CaptchaConfig>) -> Option<Self> {
        config.map(|c| Self {
            script_url: c.provider.script_url(),
            widget_class: c.provider.widget_class(),
            site_key: c.site_key.clone(),
        })
    }
}

/// Token posted by the configured provider's widget.
///
/// With no provider configured nothing is read and nothing is required.
#[must_use]
pub fn submitted(config: Option<&CaptchaConfig>, fields: &HashMap<String, String>) -> SubmittedCaptcha {
    let raw = config.and_then(|c| fields.get(c.provider.token_field()).cloned());
    SubmittedCaptcha::new(raw)
}
