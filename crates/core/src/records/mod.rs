//! Transfer records exchanged with the parish API.
//!
//! Each record type is the shape the API returns from its list endpoint. Each
//! editable record also has a `*Form` (what an HTML form posts, all strings)
//! and a `*Payload` (what the API accepts on create/update). Converting a form
//! into a payload is where required fields are checked, so a request with a
//! missing field never leaves the server.

pub mod admin_account;
pub mod agenda;
pub mod aviso;
pub mod contact;
pub mod dashboard;
pub mod evento;
pub mod horario;
pub mod inscricao;

use chrono::{NaiveDate, NaiveTime};

pub use admin_account::{AdminAccount, AdminAccountForm, AdminAccountPayload};
pub use agenda::{AgendaForm, AgendaItem, AgendaPayload};
pub use aviso::{Aviso, AvisoForm, AvisoPayload};
pub use contact::{ContactForm, ContactMessage};
pub use dashboard::{Activity, DashboardStats, DashboardSummary};
pub use evento::{Evento, EventoForm, EventoPayload, VacancyKind};
pub use horario::{Horario, HorarioForm, HorarioPayload, Weekday, WeekdayGroup, group_by_weekday};
pub use inscricao::{Inscricao, InscricaoForm, InscricaoPayload};

use crate::types::wire;

/// A form failed local validation.
///
/// Messages are shown inline next to the form, in the site's language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("O campo \"{0}\" é obrigatório.")]
    Missing(&'static str),
    #[error("Data inválida no campo \"{0}\".")]
    InvalidDate(&'static str),
    #[error("Horário inválido no campo \"{0}\".")]
    InvalidTime(&'static str),
    #[error("Número inválido no campo \"{0}\".")]
    InvalidNumber(&'static str),
    #[error("E-mail inválido.")]
    InvalidEmail,
}

fn required(label: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(label));
    }
    Ok(value.to_owned())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn required_date(label: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let raw = required(label, value)?;
    wire::parse_date(&raw).ok_or(FormError::InvalidDate(label))
}

fn required_time(label: &'static str, value: &str) -> Result<NaiveTime, FormError> {
    let raw = required(label, value)?;
    wire::parse_time(&raw).ok_or(FormError::InvalidTime(label))
}

fn date_input(date: NaiveDate) -> String {
    date.format(wire::DATE_FORMAT).to_string()
}

fn time_input(time: NaiveTime) -> String {
    time.format(wire::TIME_FORMAT).to_string()
}
