//! Role flag carried on the authenticated user record.

use serde::{Deserialize, Serialize};

/// Privilege level of a back-office user (`tipo` on the wire).
///
/// Only [`Role::Admin`] is elevated. The parish API has shipped user records
/// without a `tipo` and with values other than the two known ones; both
/// decode as [`Role::Gestor`] so an unexpected flag can never grant admin
/// access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including admin-account management.
    Admin,
    /// Standard back-office access.
    #[default]
    #[serde(other)]
    Gestor,
}

impl Role {
    /// Whether this is the elevated role.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Decode a `tipo` field that may be missing, `null`, or not a string.
    ///
    /// Anything other than a recognised role string becomes [`Role::Gestor`].
    ///
    /// # Errors
    ///
    /// Fails only if the underlying value is not valid JSON.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::deserialize(raw).unwrap_or_default())
    }

    /// Wire value of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Gestor => "gestor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>("\"gestor\"").unwrap(), Role::Gestor);
    }

    #[test]
    fn test_unknown_role_is_not_elevated() {
        let role: Role = serde_json::from_str("\"superuser\"").unwrap();
        assert_eq!(role, Role::Gestor);
        assert!(!role.is_elevated());
    }

    #[test]
    fn test_only_admin_is_elevated() {
        assert!(Role::Admin.is_elevated());
        assert!(!Role::Gestor.is_elevated());
    }

    #[test]
    fn test_lenient_decoding_never_elevates() {
        #[derive(Deserialize)]
        struct Flag {
            #[serde(default, deserialize_with = "Role::deserialize_lenient")]
            tipo: Role,
        }

        for raw in [r#"{}"#, r#"{"tipo":null}"#, r#"{"tipo":1}"#, r#"{"tipo":"ADMIN"}"#] {
            let flag: Flag = serde_json::from_str(raw).unwrap();
            assert_eq!(flag.tipo, Role::Gestor, "input {raw}");
        }
        let flag: Flag = serde_json::from_str(r#"{"tipo":"admin"}"#).unwrap();
        assert_eq!(flag.tipo, Role::Admin);
    }
}
