//! Per-browser session store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use paroquia_core::{SessionState, UserRecord};

/// Single source of truth for "who is logged in" in one browser session.
///
/// Cheap to clone; all clones share one watch channel. Handlers read through
/// [`snapshot`](Self::snapshot) and never touch the user directly.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// New store in the loading state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::loading());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Apply the bootstrap probe result.
    ///
    /// Only takes effect while the store is still loading, so a probe that
    /// lands after an explicit login or logout never overwrites it. Returns
    /// whether the state changed.
    pub fn resolve(&self, user: Option<UserRecord>) -> bool {
        self.tx.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = SessionState::resolved(user);
            true
        })
    }

    /// Record a user already validated by the credential exchange.
    pub fn login(&self, user: UserRecord) {
        self.tx.send_replace(SessionState::logged_in(user));
    }

    /// Forget the current user.
    pub fn logout(&self) {
        self.tx.send_replace(SessionState::logged_out());
    }

    /// Wait up to `max` for the store to leave the loading state.
    ///
    /// Returns the settled state, or the current (still loading) state once
    /// the wait runs out.
    pub async fn wait_resolved(&self, max: Duration) -> SessionState {
        let mut rx = self.subscribe();
        let settled = tokio::time::timeout(max, rx.wait_for(|state| !state.is_loading())).await;
        match settled {
            Ok(Ok(state)) => state.clone(),
            _ => self.snapshot(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
