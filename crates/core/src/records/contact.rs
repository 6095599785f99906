//! Contact-form message forwarded to the parish mailbox.

use serde::{Deserialize, Serialize};

use super::{FormError, optional, required};
use crate::types::Email;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub nome: String,
    pub email: Email,
    pub telefone: Option<String>,
    pub assunto: String,
    pub mensagem: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub assunto: String,
    pub mensagem: String,
}

impl ContactForm {
    /// # Errors
    ///
    /// Returns the first missing field, or [`FormError::InvalidEmail`].
    pub fn validate(&self) -> Result<ContactMessage, FormError> {
        let nome = required("nome", &self.nome)?;
        let email = required("email", &self.email)?;
        let email = Email::parse(&email).map_err(|_| FormError::InvalidEmail)?;

        Ok(ContactMessage {
            nome,
            email,
            telefone: optional(&self.telefone),
            assunto: required("assunto", &self.assunto)?,
            mensagem: required("mensagem", &self.mensagem)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_optional() {
        let form = ContactForm {
            nome: "Lúcia".into(),
            email: "lucia@exemplo.com".into(),
            telefone: String::new(),
            assunto: "Batizado".into(),
            mensagem: "Gostaria de agendar.".into(),
        };
        let message = form.validate().unwrap();
        assert_eq!(message.telefone, None);
    }

    #[test]
    fn test_mensagem_required() {
        let form = ContactForm {
            nome: "Lúcia".into(),
            email: "lucia@exemplo.com".into(),
            assunto: "Batizado".into(),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Missing("mensagem")));
    }
}
