//! The authenticated user as reported by the parish API.

use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// User record returned by the login and session endpoints.
///
/// `email` is optional on the wire and `tipo` defaults to [`Role::Gestor`]
/// when absent, so a record carrying only `id` and `nome` still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default, deserialize_with = "Role::deserialize_lenient")]
    pub tipo: Role,
}

impl UserRecord {
    /// Whether this user may open admin-only screens.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.tipo.is_elevated()
    }

    /// First name, for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.nome.split_whitespace().next().unwrap_or(&self.nome)
    }
}
