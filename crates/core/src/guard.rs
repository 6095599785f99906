//! Route guard decision table.
//!
//! Protected routes ask the guard what to do with the current
//! [`SessionState`]. The answer is total: an errored session probe looks
//! exactly like "not logged in", and the guard itself never fails.
//!
//! | state                                   | decision          |
//! |-----------------------------------------|-------------------|
//! | loading                                 | `Loading`         |
//! | settled, no user                        | `Unauthenticated` |
//! | user, admin-only route, role not admin  | `Forbidden`       |
//! | otherwise                               | `Authorized`      |

use crate::session::SessionState;

/// Per-route guard configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardConfig {
    /// Require the elevated role.
    pub only_admin: bool,
}

impl GuardConfig {
    /// Any authenticated user may pass.
    pub const AUTHENTICATED: Self = Self { only_admin: false };

    /// Only admins may pass.
    pub const ADMIN_ONLY: Self = Self { only_admin: true };

    /// Decide what a protected route should do for this session state.
    #[must_use]
    pub fn evaluate(self, state: &SessionState) -> GuardDecision {
        if state.is_loading() {
            return GuardDecision::Loading;
        }

        let Some(user) = state.user() else {
            return GuardDecision::Unauthenticated;
        };

        if self.only_admin && !user.is_admin() {
            return GuardDecision::Forbidden;
        }

        GuardDecision::Authorized
    }
}

/// What a protected route should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; show a placeholder, do not redirect.
    Loading,
    /// Nobody logged in; replace the location with the login view.
    Unauthenticated,
    /// Logged in without the required role; replace the location with home.
    Forbidden,
    /// Render the protected content.
    Authorized,
}

impl GuardDecision {
    /// Where the browser should be sent, if anywhere.
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated => Some("/auth"),
            Self::Forbidden => Some("/"),
            Self::Loading | Self::Authorized => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Role, UserId};
    use crate::user::UserRecord;

    fn user(tipo: Role) -> UserRecord {
        UserRecord {
            id: UserId::new(1),
            nome: "Teste".to_string(),
            email: None,
            tipo,
        }
    }

    #[test]
    fn test_loading_wins_regardless_of_user() {
        for config in [GuardConfig::AUTHENTICATED, GuardConfig::ADMIN_ONLY] {
            assert_eq!(config.evaluate(&SessionState::loading()), GuardDecision::Loading);
        }
    }

    #[test]
    fn test_no_user_goes_to_login() {
        for config in [GuardConfig::AUTHENTICATED, GuardConfig::ADMIN_ONLY] {
            let decision = config.evaluate(&SessionState::logged_out());
            assert_eq!(decision, GuardDecision::Unauthenticated);
            assert_eq!(decision.redirect_target(), Some("/auth"));
        }
    }

    #[test]
    fn test_admin_only_requires_admin_role() {
        let gestor = SessionState::logged_in(user(Role::Gestor));
        let admin = SessionState::logged_in(user(Role::Admin));

        assert_eq!(GuardConfig::ADMIN_ONLY.evaluate(&gestor), GuardDecision::Forbidden);
        assert_eq!(GuardConfig::ADMIN_ONLY.evaluate(&admin), GuardDecision::Authorized);
        assert_eq!(GuardDecision::Forbidden.redirect_target(), Some("/"));
    }

    #[test]
    fn test_default_guard_admits_any_user() {
        assert_eq!(GuardConfig::default(), GuardConfig::AUTHENTICATED);
        for role in [Role::Gestor, Role::Admin] {
            let state = SessionState::logged_in(user(role));
            assert_eq!(GuardConfig::default().evaluate(&state), GuardDecision::Authorized);
        }
    }
}
