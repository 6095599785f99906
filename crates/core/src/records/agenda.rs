//! Parish agenda entries (masses, weddings, baptisms, pastoral meetings).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{FormError, date_input, optional, required, required_date, required_time, time_input};
use crate::types::{AgendaId, UserId, wire};

/// Agenda categories offered by the back-office.
pub const AGENDA_TIPOS: [(&str, &str); 4] = [
    ("missa", "Missa"),
    ("casamento", "Casamento"),
    ("batismo", "Batismo"),
    ("pastoral", "Evento Pastoral"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: AgendaId,
    pub titulo: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
    #[serde(default)]
    pub local: String,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub criado_por: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaPayload {
    pub titulo: String,
    pub tipo: String,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
    pub local: String,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgendaForm {
    pub titulo: String,
    pub tipo: String,
    pub data: String,
    pub local: String,
    pub horario: String,
    pub descricao: String,
}

impl AgendaForm {
    /// Check required fields and build the API payload.
    ///
    /// # Errors
    ///
    /// Returns the first field that is missing or malformed.
    pub fn validate(&self) -> Result<AgendaPayload, FormError> {
        Ok(AgendaPayload {
            titulo: required("titulo", &self.titulo)?,
            tipo: required("tipo", &self.tipo)?,
            data: required_date("data", &self.data)?,
            local: required("local", &self.local)?,
            horario: required_time("horario", &self.horario)?,
            descricao: optional(&self.descricao),
        })
    }
}

impl From<&AgendaItem> for AgendaForm {
    fn from(item: &AgendaItem) -> Self {
        Self {
            titulo: item.titulo.clone(),
            tipo: item.tipo.clone(),
            data: date_input(item.data),
            local: item.local.clone(),
            horario: time_input(item.horario),
            descricao: item.descricao.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> AgendaForm {
        AgendaForm {
            titulo: "Missa de Natal".into(),
            tipo: "missa".into(),
            data: "2025-12-24".into(),
            local: "Matriz".into(),
            horario: "22:00".into(),
            descricao: String::new(),
        }
    }

    #[test]
    fn test_validate_builds_payload() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.titulo, "Missa de Natal");
        assert_eq!(payload.descricao, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["data"], "2025-12-24");
        assert_eq!(json["horario"], "22:00");
    }

    #[test]
    fn test_validate_rejects_missing_date() {
        let form = AgendaForm {
            data: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(FormError::Missing("data")));
    }

    #[test]
    fn test_edit_form_prefills_from_record() {
        let item: AgendaItem = serde_json::from_str(
            r#"{"id":4,"titulo":"Batizado","tipo":"batismo","local":"Capela",
                "data":"2025-03-01","horario":"10:30:00","descricao":null,"criado_por":2}"#,
        )
        .unwrap();
        let form = AgendaForm::from(&item);
        assert_eq!(form.horario, "10:30");
        assert_eq!(form.data, "2025-03-01");
        assert_eq!(form.descricao, "");
    }
}
