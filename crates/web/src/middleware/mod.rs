//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. Request ID
//! 4. Security headers
//! 5. Session layer (tower-sessions, in-memory store)
//! 6. Session bootstrap (attaches the browser session's store)
//! 7. Route guard (`route_layer` on `/admin`)
//! 8. Rate limiting (login form only)

pub mod auth;
pub mod bootstrap;
pub mod guard;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{Client, OptionalUser, RequireUser};
pub use bootstrap::session_bootstrap_middleware;
pub use guard::{require_admin, require_session};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
