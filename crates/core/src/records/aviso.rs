//! Parish notices.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{FormError, date_input, optional, required, required_date};
use crate::types::{AvisoId, UserId, wire};

/// Notice categories offered by the back-office.
pub const AVISO_CATEGORIAS: [(&str, &str); 3] = [
    ("importante", "Importante"),
    ("evento", "Evento"),
    ("geral", "Geral"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aviso {
    pub id: AvisoId,
    pub titulo: String,
    #[serde(default)]
    pub categoria: String,
    /// The API sends `""` for "no link"; that decodes as `None`.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
    #[serde(default)]
    pub criado_por_id: Option<UserId>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Sort newest first, keeping API order for notices on the same day.
pub fn sort_newest_first(avisos: &mut [Aviso]) {
    avisos.sort_by(|a, b| b.data.cmp(&a.data));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvisoPayload {
    pub titulo: String,
    pub categoria: String,
    pub url: Option<String>,
    pub descricao: Option<String>,
    #[serde(with = "wire::date")]
    pub data: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvisoForm {
    pub titulo: String,
    pub categoria: String,
    pub url: String,
    pub descricao: String,
    pub data: String,
}

impl AvisoForm {
    /// Check required fields and build the API payload.
    ///
    /// # Errors
    ///
    /// Returns the first field that is missing or malformed.
    pub fn validate(&self) -> Result<AvisoPayload, FormError> {
        Ok(AvisoPayload {
            titulo: required("titulo", &self.titulo)?,
            categoria: required("categoria", &self.categoria)?,
            url: optional(&self.url),
            descricao: optional(&self.descricao),
            data: required_date("data", &self.data)?,
        })
    }
}

impl From<&Aviso> for AvisoForm {
    fn from(aviso: &Aviso) -> Self {
        Self {
            titulo: aviso.titulo.clone(),
            categoria: aviso.categoria.clone(),
            url: aviso.url.clone().unwrap_or_default(),
            descricao: aviso.descricao.clone().unwrap_or_default(),
            data: date_input(aviso.data),
        }
    }
}
