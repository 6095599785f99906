//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAROQUIA_API_URL` - Base URL of the parish REST API (e.g. `http://localhost:5000/api/v1`)
//! - `PAROQUIA_BASE_URL` - Public URL of this site
//!
//! ## Optional
//! - `PAROQUIA_HOST` - Bind address (default: 127.0.0.1)
//! - `PAROQUIA_PORT` - Listen port (default: 3000)
//! - `PAROQUIA_API_TIMEOUT_SECS` - Parish API request timeout (default: 10)
//! - `PAROQUIA_GUARD_WAIT_MS` - How long a protected route waits for the session probe (default: 1500)
//! - `PAROQUIA_FEED_POLL_SECS` - Public list refresh interval (default: 5)
//! - `PAROQUIA_SESSION_IDLE_MINUTES` - Browser session inactivity expiry (default: 120)
//! - `PAROQUIA_RATE_LIMIT` - Rate limit the login form (default: true)
//! - `PAROQUIA_LOG_JSON` - Emit JSON logs (default: false)
//! - `CAPTCHA_PROVIDER` - `hcaptcha`, `recaptcha` or `turnstile`
//! - `CAPTCHA_SITE_KEY` - Public site key (required when a provider is set)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Third-party CAPTCHA widget in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaProvider {
    HCaptcha,
    ReCaptcha,
    Turnstile,
}

impl CaptchaProvider {
    /// Widget script loaded by gated pages.
    #[must_use]
    pub const fn script_url(self) -> &'static str {
        match self {
            Self::HCaptcha => "https://js.hcaptcha.com/1/api.js",
            Self::ReCaptcha => "https://www.google.com/recaptcha/api.js",
            Self::Turnstile => "https://challenges.cloudflare.com/turnstile/v0/api.js",
        }
    }

    /// CSS class the widget script looks for.
    #[must_use]
    pub const fn widget_class(self) -> &'static str {
        match self {
            Self::HCaptcha => "h-captcha",
            Self::ReCaptcha => "g-recaptcha",
            Self::Turnstile => "cf-turnstile",
        }
    }

    /// Form field the widget writes its token into.
    #[must_use]
    pub const fn token_field(self) -> &'static str {
        match self {
            Self::HCaptcha => "h-captcha-response",
            Self::ReCaptcha => "g-recaptcha-response",
            Self::Turnstile => "cf-turnstile-response",
        }
    }
}

impl FromStr for CaptchaProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hcaptcha" => Ok(Self::HCaptcha),
            "recaptcha" => Ok(Self::ReCaptcha),
            "turnstile" => Ok(Self::Turnstile),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// CAPTCHA widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaConfig {
    pub provider: CaptchaProvider,
    pub site_key: String,
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Parish REST API base URL
    pub api_url: Url,
    /// Timeout for every parish API request
    pub api_timeout: Duration,
    /// Upper bound a protected route waits for the session probe
    pub guard_wait: Duration,
    /// Refresh interval of the public feeds
    pub feed_poll_interval: Duration,
    /// Browser session inactivity expiry
    pub session_idle: Duration,
    /// Rate limit login attempts per client IP
    pub rate_limit: bool,
    /// JSON log output
    pub log_json: bool,
    /// CAPTCHA widget, if gated forms require one
    pub captcha: Option<CaptchaConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl WebConfig {
    /// Defaults for everything except the two URLs.
    #[must_use]
    pub fn new(api_url: Url, base_url: impl Into<String>) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: base_url.into(),
            api_url,
            api_timeout: Duration::from_secs(10),
            guard_wait: Duration::from_millis(1500),
            feed_poll_interval: Duration::from_secs(5),
            session_idle: Duration::from_secs(120 * 60),
            rate_limit: true,
            log_json: false,
            captcha: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = get_required(&get, "PAROQUIA_API_URL")?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("PAROQUIA_API_URL".to_string(), e.to_string()))?;
        let base_url = get_required(&get, "PAROQUIA_BASE_URL")?;

        let mut config = Self::new(api_url, base_url);
        config.host = get_parsed(&get, "PAROQUIA_HOST", config.host)?;
        config.port = get_parsed(&get, "PAROQUIA_PORT", config.port)?;
        config.api_timeout =
            Duration::from_secs(get_parsed(&get, "PAROQUIA_API_TIMEOUT_SECS", 10_u64)?);
        config.guard_wait =
            Duration::from_millis(get_parsed(&get, "PAROQUIA_GUARD_WAIT_MS", 1500_u64)?);
        config.feed_poll_interval =
            Duration::from_secs(get_parsed(&get, "PAROQUIA_FEED_POLL_SECS", 5_u64)?.max(1));
        config.session_idle =
            Duration::from_secs(get_parsed(&get, "PAROQUIA_SESSION_IDLE_MINUTES", 120_u64)?.saturating_mul(60));
        config.rate_limit = get_flag(&get, "PAROQUIA_RATE_LIMIT", true)?;
        config.log_json = get_flag(&get, "PAROQUIA_LOG_JSON", false)?;
        config.captcha = captcha_from_source(&get)?;
        config.sentry_dsn = get_optional(&get, "SENTRY_DSN");
        config.sentry_environment = get_optional(&get, "SENTRY_ENVIRONMENT");
        config.sentry_sample_rate = get_parsed(&get, "SENTRY_SAMPLE_RATE", 1.0_f32)?;
        config.sentry_traces_sample_rate = get_parsed(&get, "SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?;

        Ok(config)
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the session cookie must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn captcha_from_source(
    get: &impl Fn(&str) -> Option<String>,
) -> Result<Option<CaptchaConfig>, ConfigError> {
    let Some(provider) = get_optional(get, "CAPTCHA_PROVIDER") else {
        return Ok(None);
    };
    let provider = provider
        .parse::<CaptchaProvider>()
        .map_err(|e| ConfigError::InvalidEnvVar("CAPTCHA_PROVIDER".to_string(), e))?;
    let site_key = get_required(get, "CAPTCHA_SITE_KEY")?;
    Ok(Some(CaptchaConfig { provider, site_key }))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable. Blank counts as missing.
fn get_required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    get_optional(get, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional variable. Blank counts as unset.
fn get_optional(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Get and parse a variable, falling back to a default when unset.
fn get_parsed<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional(get, key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Get a boolean flag (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`).
fn get_flag(get: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = get_optional(get, key) else {
        return Ok(default);
    };
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{raw}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("PAROQUIA_API_URL", "http://localhost:5000/api/v1"),
        ("PAROQUIA_BASE_URL", "http://localhost:3000"),
    ];

    #[test]
    fn test_defaults() {
        let config = WebConfig::from_source(source(&REQUIRED)).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_timeout, Duration::from_secs(10));
        assert_eq!(config.guard_wait, Duration::from_millis(1500));
        assert_eq!(config.feed_poll_interval, Duration::from_secs(5));
        assert_eq!(config.session_idle, Duration::from_secs(7200));
        assert!(config.rate_limit);
        assert!(!config.log_json);
        assert!(config.captcha.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_missing_api_url() {
        let err = WebConfig::from_source(source(&[("PAROQUIA_BASE_URL", "http://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "PAROQUIA_API_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PAROQUIA_PORT", "porta"));
        let err = WebConfig::from_source(source(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PAROQUIA_PORT"));
    }

    #[test]
    fn test_flags() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PAROQUIA_RATE_LIMIT", "off"));
        pairs.push(("PAROQUIA_LOG_JSON", "1"));
        let config = WebConfig::from_source(source(&pairs)).unwrap();
        assert!(!config.rate_limit);
        assert!(config.log_json);

        let mut bad = REQUIRED.to_vec();
        bad.push(("PAROQUIA_LOG_JSON", "talvez"));
        assert!(WebConfig::from_source(source(&bad)).is_err());
    }

    #[test]
    fn test_captcha_requires_site_key() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CAPTCHA_PROVIDER", "Turnstile"));
        let err = WebConfig::from_source(source(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "CAPTCHA_SITE_KEY"));

        pairs.push(("CAPTCHA_SITE_KEY", "0x4AAA"));
        let captcha = WebConfig::from_source(source(&pairs)).unwrap().captcha.unwrap();
        assert_eq!(captcha.provider, CaptchaProvider::Turnstile);
        assert_eq!(captcha.provider.token_field(), "cf-turnstile-response");
    }

    #[test]
    fn test_unknown_captcha_provider() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CAPTCHA_PROVIDER", "friendly"));
        pairs.push(("CAPTCHA_SITE_KEY", "k"));
        assert!(WebConfig::from_source(source(&pairs)).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PAROQUIA_HOST", "0.0.0.0"));
        pairs.push(("PAROQUIA_PORT", "8080"));
        let config = WebConfig::from_source(source(&pairs)).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = WebConfig::new(
            Url::parse("https://api.paroquia.org/api/v1").unwrap(),
            "https://paroquia.org",
        );
        assert!(config.is_secure());
    }
}
