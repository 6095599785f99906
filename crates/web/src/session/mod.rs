//! Server-side session state.
//!
//! Each browser gets a `tower-sessions` cookie carrying a client ID and, after
//! login, the parish API credential. The client ID selects a
//! [`SessionStore`] in the [`SessionRegistry`].

pub mod registry;
pub mod store;

use uuid::Uuid;

use paroquia_core::UserRecord;

use crate::api::Credential;

pub use registry::SessionRegistry;
pub use store::SessionStore;

/// Keys stored in the `tower-sessions` session.
pub mod keys {
    /// Browser-session ID selecting the [`SessionStore`](super::SessionStore).
    pub const CLIENT_ID: &str = "client_id";
    /// Parish API `Cookie` header value.
    pub const BACKEND_COOKIE: &str = "backend_cookie";
}

/// Request extension set by the bootstrap middleware.
#[derive(Clone)]
pub struct ClientHandle {
    pub id: Uuid,
    pub store: SessionStore,
    pub credential: Option<Credential>,
}

/// Request extension set by the route guard once it authorizes a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserRecord,
    pub credential: Option<Credential>,
}
