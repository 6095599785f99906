//! Session state for one browser session.
//!
//! A session starts out [loading](SessionState::loading) while the "who am I"
//! probe is in flight, and becomes [resolved](SessionState::resolved) once it
//! settles. Explicit login and logout replace the state wholesale. The
//! authentication flag is never stored: it is always derived from whether a
//! user is present.

use crate::user::UserRecord;

/// Snapshot of who is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    user: Option<UserRecord>,
    is_loading: bool,
}

impl SessionState {
    /// Initial state: probe pending, nobody logged in.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// Settled state, with or without a user.
    #[must_use]
    pub const fn resolved(user: Option<UserRecord>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }

    /// Settled state after an explicit login.
    #[must_use]
    pub const fn logged_in(user: UserRecord) -> Self {
        Self::resolved(Some(user))
    }

    /// Settled state after logout.
    #[must_use]
    pub const fn logged_out() -> Self {
        Self::resolved(None)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Role, UserId};

    fn maria() -> UserRecord {
        UserRecord {
            id: UserId::new(5),
            nome: "Maria".to_string(),
            email: None,
            tipo: Role::Gestor,
        }
    }

    #[test]
    fn test_authentication_tracks_user_presence() {
        let states = [
            SessionState::loading(),
            SessionState::resolved(None),
            SessionState::resolved(Some(maria())),
            SessionState::logged_in(maria()),
            SessionState::logged_out(),
        ];
        for state in states {
            assert_eq!(state.is_authenticated(), state.user().is_some());
        }
    }

    #[test]
    fn test_starts_loading_without_user() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert!(state.user().is_none());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_login_then_logout() {
        let state = SessionState::logged_in(maria());
        assert!(!state.is_loading());
        assert_eq!(state.user().unwrap().nome, "Maria");

        let state = SessionState::logged_out();
        assert!(!state.is_loading());
        assert!(!state.is_authenticated());
    }
}
