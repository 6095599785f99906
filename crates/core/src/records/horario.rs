//! Recurring mass and service schedule.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{FormError, required, required_time, time_input};
use crate::types::{HorarioId, wire};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horario {
    pub id: HorarioId,
    #[serde(default)]
    pub dia: String,
    pub titulo: String,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    #[serde(default)]
    pub local: String,
}

/// Day of the week as stored in `dia`, in calendar order (Sunday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Domingo,
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Domingo,
        Self::Segunda,
        Self::Terca,
        Self::Quarta,
        Self::Quinta,
        Self::Sexta,
        Self::Sabado,
    ];

    /// Label used by the back-office and written to the API.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Domingo => "Domingo",
            Self::Segunda => "Segunda-feira",
            Self::Terca => "Terça-feira",
            Self::Quarta => "Quarta-feira",
            Self::Quinta => "Quinta-feira",
            Self::Sexta => "Sexta-feira",
            Self::Sabado => "Sábado",
        }
    }

    /// Recognise a stored day name.
    ///
    /// Accepts the full label, the short form ("segunda"), any case, and
    /// missing accents ("terca", "sabado").
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'ç' => 'c',
                'á' | 'à' | 'â' | 'ã' => 'a',
                other => other,
            })
            .collect();
        let stem = folded.strip_suffix("-feira").unwrap_or(&folded).trim();

        match stem {
            "domingo" => Some(Self::Domingo),
            "segunda" => Some(Self::Segunda),
            "terca" => Some(Self::Terca),
            "quarta" => Some(Self::Quarta),
            "quinta" => Some(Self::Quinta),
            "sexta" => Some(Self::Sexta),
            "sabado" => Some(Self::Sabado),
            _ => None,
        }
    }
}

/// Schedule entries for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayGroup {
    /// Heading shown for the group.
    pub label: String,
    pub horarios: Vec<Horario>,
}

/// Group schedule entries by weekday in calendar order, each day sorted by
/// time. Days with no entries are omitted; entries whose day is not
/// recognised are kept in trailing groups under their stored name.
#[must_use]
pub fn group_by_weekday(horarios: Vec<Horario>) -> Vec<WeekdayGroup> {
    let mut known: Vec<Vec<Horario>> = vec![Vec::new(); Weekday::ALL.len()];
    let mut unknown: Vec<WeekdayGroup> = Vec::new();

    for horario in horarios {
        match Weekday::parse(&horario.dia) {
            Some(day) => {
                if let Some(bucket) = known.get_mut(day as usize) {
                    bucket.push(horario);
                }
            }
            None => match unknown.iter_mut().find(|g| g.label == horario.dia) {
                Some(group) => group.horarios.push(horario),
                None => unknown.push(WeekdayGroup {
                    label: horario.dia.clone(),
                    horarios: vec![horario],
                }),
            },
        }
    }

    let mut groups: Vec<WeekdayGroup> = Weekday::ALL
        .iter()
        .zip(known)
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(day, horarios)| WeekdayGroup {
            label: day.label().to_owned(),
            horarios,
        })
        .collect();
    groups.extend(unknown);

    for group in &mut groups {
        group.horarios.sort_by_key(|h| h.horario);
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HorarioPayload {
    pub dia: String,
    pub titulo: String,
    #[serde(with = "wire::time")]
    pub horario: NaiveTime,
    pub local: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HorarioForm {
    pub dia: String,
    pub titulo: String,
    pub horario: String,
    pub local: String,
}

impl HorarioForm {
    /// Check required fields and build the API payload.
    ///
    /// # Errors
    ///
    /// Returns the first field that is missing or malformed.
    pub fn validate(&self) -> Result<HorarioPayload, FormError> {
        Ok(HorarioPayload {
            dia: required("dia", &self.dia)?,
            titulo: required("titulo", &self.titulo)?,
            horario: required_time("horario", &self.horario)?,
            local: required("local", &self.local)?,
        })
    }
}

impl From<&Horario> for HorarioForm {
    fn from(horario: &Horario) -> Self {
        Self {
            dia: horario.dia.clone(),
            titulo: horario.titulo.clone(),
            horario: time_input(horario.horario),
            local: horario.local.clone(),
        }
    }
}
