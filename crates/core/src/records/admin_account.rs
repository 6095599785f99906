//! Back-office user accounts (the "membros" screen).

use serde::{Deserialize, Serialize};

use super::{FormError, optional, required};
use crate::types::{AdminAccountId, Email};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminAccountId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub joined: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body for create and update.
///
/// On update a missing password leaves the stored one unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminAccountPayload {
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminAccountForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl std::fmt::Debug for AdminAccountForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccountForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .finish()
    }
}

impl AdminAccountForm {
    /// Validate for account creation; the password is mandatory.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate_create(&self) -> Result<AdminAccountPayload, FormError> {
        let payload = self.validate_update()?;
        if payload.password.is_none() {
            return Err(FormError::Missing("password"));
        }
        Ok(payload)
    }

    /// Validate for an account update; a blank password is left out.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate_update(&self) -> Result<AdminAccountPayload, FormError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let email = Email::parse(&email).map_err(|_| FormError::InvalidEmail)?;
        let password = (!self.password.is_empty()).then(|| self.password.clone());

        Ok(AdminAccountPayload {
            name,
            email,
            password,
            phone: optional(&self.phone),
        })
    }

    /// Prefill an edit form. The password is never echoed back.
    #[must_use]
    pub fn for_edit(account: &AdminAccount) -> Self {
        let phone = if account.phone == "N/A" {
            String::new()
        } else {
            account.phone.clone()
        };
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            password: String::new(),
            phone,
        }
    }
}
