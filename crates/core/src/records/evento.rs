//! Parish events with optional vacancy limits.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{FormError, date_input, optional, required, required_date, required_time, time_input};
use crate::capacity::Capacity;
use crate::types::{EventoId, UserId, wire};

/// Event categories offered by the back-office.
pub const EVENTO_TIPOS: [(&str, &str); 6] = [
    ("outro", "Outro"),
    ("formacao", "Formação"),
    ("espiritualidade", "Espiritualidade"),
    ("festividade", "Festividade"),
    ("acaoSocial", "Ação Social"),
    ("administrativo", "Administrativo"),
];

/// Whether an event caps registrations (`tipo_vagas`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VacancyKind {
    Limitada,
    #[default]
    #[serde(other)]
    Aberta,
}

impl VacancyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limitada => "limitada",
            Self::Aberta => "aberta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evento {
    pub id: EventoId,
    pub titulo: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub local: String,
    #[serde(default)]
    pub tipo_vagas: Option<VacancyKind>,
    #[serde(default)]
    pub numero_vagas: Option<u32>,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub criado_por: Option<UserId>,
}

impl Evento {
    /// Registration counter for this event.
    ///
    /// Only a limited event with a vacancy number has a cap.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        match (self.tipo_vagas, self.numero_vagas) {
            (Some(VacancyKind::Limitada), Some(vagas)) => {
                Capacity::new(self.registered_count, Some(vagas))
            }
            _ => Capacity::open(self.registered_count),
        }
    }
}

/// Sort by date then time, soonest first.
pub fn sort_chronologically(eventos: &mut [Evento]) {
    eventos.sort_by_key(|e| (e.data, e.horario));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventoPayload {
    pub titulo: String,
    pub tipo: String,
    pub local: String,
    pub tipo_vagas: VacancyKind,
    pub numero_vagas: Option<u32>,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventoForm {
    pub titulo: String,
    pub tipo: String,
    pub local: String,
    pub tipo_vagas: String,
    pub numero_vagas: String,
    pub data: String,
    pub horario: String,
    pub descricao: String,
}

impl EventoForm {
    /// Check required fields and build the API payload.
    ///
    /// A limited event needs a vacancy number; an open one drops it.
    ///
    /// # Errors
    ///
    /// Returns the first field that is missing or malformed.
    pub fn validate(&self) -> Result<EventoPayload, FormError> {
        let tipo_vagas = if self.tipo_vagas.trim() == VacancyKind::Limitada.as_str() {
            VacancyKind::Limitada
        } else {
            VacancyKind::Aberta
        };

        let numero_vagas = match tipo_vagas {
            VacancyKind::Limitada => {
                let raw = required("numero_vagas", &self.numero_vagas)?;
                Some(
                    raw.parse::<u32>()
                        .map_err(|_| FormError::InvalidNumber("numero_vagas"))?,
                )
            }
            VacancyKind::Aberta => None,
        };

        Ok(EventoPayload {
            titulo: required("titulo", &self.titulo)?,
            tipo: required("tipo", &self.tipo)?,
            local: required("local", &self.local)?,
            tipo_vagas,
            numero_vagas,
            data: required_date("data", &self.data)?,
            horario: required_time("horario", &self.horario)?,
            descricao: optional(&self.descricao),
        })
    }
}

impl From<&Evento> for EventoForm {
    fn from(evento: &Evento) -> Self {
        Self {
            titulo: evento.titulo.clone(),
            tipo: evento.tipo.clone(),
            local: evento.local.clone(),
            tipo_vagas: evento.tipo_vagas.unwrap_or_default().as_str().to_owned(),
            numero_vagas: evento
                .numero_vagas
                .map(|n| n.to_string())
                .unwrap_or_default(),
            data: date_input(evento.data),
            horario: time_input(evento.horario),
            descricao: evento.descricao.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn evento(tipo_vagas: &str, numero_vagas: Option<u32>, registered: u32) -> Evento {
        serde_json::from_value(serde_json::json!({
            "id": 1, "titulo": "Retiro", "tipo": "espiritualidade", "local": "Salão",
            "tipo_vagas": tipo_vagas, "numero_vagas": numero_vagas,
            "data": "2025-08-15", "horario": "08:00:00", "descricao": null,
            "registered_count": registered, "criado_por": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_limited_event_capacity() {
        let capacity = evento("limitada", Some(30), 30).capacity();
        assert!(capacity.is_full());
        assert_eq!(capacity.remaining(), Some(0));
    }

    #[test]
    fn test_open_event_ignores_vacancy_number() {
        let capacity = evento("aberta", Some(30), 45).capacity();
        assert!(!capacity.is_full());
        assert_eq!(capacity.remaining(), None);
    }

    #[test]
    fn test_limited_without_number_is_open() {
        assert!(!evento("limitada", None, 100).capacity().is_full());
    }

    #[test]
    fn test_limited_form_requires_vacancies() {
        let mut form = EventoForm::from(&evento("limitada", Some(30), 0));
        form.numero_vagas = String::new();
        assert_eq!(form.validate(), Err(FormError::Missing("numero_vagas")));

        form.numero_vagas = "trinta".into();
        assert_eq!(form.validate(), Err(FormError::InvalidNumber("numero_vagas")));
    }

    #[test]
    fn test_open_form_drops_vacancies() {
        let mut form = EventoForm::from(&evento("aberta", None, 0));
        form.numero_vagas = "12".into();
        let payload = form.validate().unwrap();
        assert_eq!(payload.tipo_vagas, VacancyKind::Aberta);
        assert_eq!(payload.numero_vagas, None);
    }
}
