//! Event registrations.

use serde::{Deserialize, Serialize};

use super::{FormError, required};
use crate::types::InscricaoId;

/// One registration as listed for the secretary.
///
/// `data_inscricao` is whatever the API stored, possibly a placeholder like
/// `"N/A"`, so it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inscricao {
    pub id: InscricaoId,
    pub nome: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub data_inscricao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InscricaoPayload {
    pub nome: String,
    pub telefone: String,
}

/// Public registration form. The CAPTCHA token travels alongside and is
/// handled separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InscricaoForm {
    pub nome: String,
    pub telefone: String,
}

impl InscricaoForm {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<InscricaoPayload, FormError> {
        Ok(InscricaoPayload {
            nome: required("nome", &self.nome)?,
            telefone: required("telefone", &self.telefone)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_date_kept_as_text() {
        let inscricao: Inscricao = serde_json::from_str(
            r#"{"id":9,"nome":"José","telefone":"11999990000","data_inscricao":"N/A"}"#,
        )
        .unwrap();
        assert_eq!(inscricao.data_inscricao.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_telefone_required() {
        let form = InscricaoForm {
            nome: "José".into(),
            telefone: " ".into(),
        };
        assert_eq!(form.validate(), Err(FormError::Missing("telefone")));
    }
}
