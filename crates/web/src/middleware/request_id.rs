//! Request correlation IDs.
//!
//! Each request gets an ID: the one a proxy put in `x-request-id` when it is
//! usable, a fresh UUID v4 otherwise. The ID lands on the request span, the
//! Sentry scope and the response, and stays readable through
//! [`RequestId::current`] while the request is handled, so calls to the
//! parish API carry the same ID.

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID kept as is.
const MAX_UPSTREAM_LEN: usize = 64;

tokio::task_local! {
    static CURRENT: RequestId;
}

/// Correlation ID of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// A fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The proxy's ID, if it is short printable ASCII without spaces.
    #[must_use]
    pub fn from_upstream(headers: &HeaderMap) -> Option<Self> {
        let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
        let usable = !id.is_empty()
            && id.len() <= MAX_UPSTREAM_LEN
            && id.bytes().all(|b| b.is_ascii_graphic());
        usable.then(|| Self(id.to_string()))
    }

    /// ID of the request being handled on this task.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(Clone::clone).ok()
    }

    /// Run `future` with this as the current ID.
    pub async fn scope<F: Future>(self, future: F) -> F::Output {
        CURRENT.scope(self, future).await
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware that gives every request a correlation ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = RequestId::from_upstream(request.headers()).unwrap_or_else(RequestId::generate);

    Span::current().record("request_id", id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", id.as_str());
    });
    request.extensions_mut().insert(id.clone());

    let header = HeaderValue::from_str(id.as_str()).ok();
    let mut response = id.scope(next.run(request)).await;

    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_upstream_id_is_kept() {
        let id = RequestId::from_upstream(&headers("lb-7f3a-0001")).unwrap();
        assert_eq!(id.as_str(), "lb-7f3a-0001");
    }

    #[test]
    fn test_unusable_upstream_ids_are_replaced() {
        assert!(RequestId::from_upstream(&HeaderMap::new()).is_none());
        assert!(RequestId::from_upstream(&headers("")).is_none());
        assert!(RequestId::from_upstream(&headers("two words")).is_none());
        assert!(RequestId::from_upstream(&headers(&"x".repeat(65))).is_none());
    }

    #[tokio::test]
    async fn test_current_is_scoped_to_the_request() {
        assert!(RequestId::current().is_none());
        let id = RequestId::generate();
        let seen = id.clone().scope(async { RequestId::current() }).await;
        assert_eq!(seen, Some(id));
    }
}
