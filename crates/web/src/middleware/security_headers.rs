//! Security headers middleware.
//!
//! Locked down except where the CAPTCHA widgets need it: their scripts and
//! iframes come from the providers' hosts, so those are allowed in
//! `script-src`, `frame-src` and `connect-src`. There is no
//! `Cross-Origin-Embedder-Policy` because the widget iframes do not send
//! CORP headers.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Hosts serving CAPTCHA scripts and frames.
const CAPTCHA_HOSTS: &str = "https://js.hcaptcha.com https://*.hcaptcha.com \
     https://www.google.com https://www.gstatic.com \
     https://challenges.cloudflare.com";

/// Content-Security-Policy sent with every response.
#[must_use]
pub fn content_security_policy() -> String {
    format!(
        "default-src 'none'; \
         script-src 'self' {CAPTCHA_HOSTS}; \
         style-src 'self' 'unsafe-inline'; \
         font-src 'self'; \
         img-src 'self' data:; \
         connect-src 'self' {CAPTCHA_HOSTS}; \
         frame-src {CAPTCHA_HOSTS}; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));

    if let Ok(csp) = HeaderValue::from_str(&content_security_policy()) {
        headers.insert(CONTENT_SECURITY_POLICY, csp);
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), \
             geolocation=(), \
             microphone=(), \
             payment=(), \
             usb=()",
        ),
    );

    // Pages depend on the session; never let a proxy keep them.
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin-allow-popups"),
    );

    headers.insert(
        HeaderName::from_static("x-dns-prefetch-control"),
        HeaderValue::from_static("off"),
    );

    response
}
