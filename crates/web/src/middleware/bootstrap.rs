//! Per-request session bootstrap.
//!
//! Resolves the browser session's [`SessionStore`](crate::session::SessionStore)
//! and attaches it to the request as a [`ClientHandle`]. The first request of
//! a browser session creates the store and starts its one-shot probe.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;
use tracing::warn;
use uuid::Uuid;

use crate::api::Credential;
use crate::session::{ClientHandle, keys};
use crate::state::AppState;

/// Attach the [`ClientHandle`] for this browser session.
///
/// If the session cannot be read or written the request continues with a
/// throwaway client ID, which reads as "not logged in".
pub async fn session_bootstrap_middleware(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let id = match client_id(&session).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Session unavailable, using a transient client");
            Uuid::new_v4()
        }
    };

    let credential = session
        .get::<String>(keys::BACKEND_COOKIE)
        .await
        .ok()
        .flatten()
        .map(Credential::new);

    let store = state
        .sessions()
        .get_or_bootstrap(id, credential.clone())
        .await;

    request.extensions_mut().insert(ClientHandle {
        id,
        store,
        credential,
    });

    next.run(request).await
}

/// Client ID of this browser session, assigned on first use.
async fn client_id(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(id) = session.get::<Uuid>(keys::CLIENT_ID).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(keys::CLIENT_ID, id).await?;
    Ok(id)
}
