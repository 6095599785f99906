//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use paroquia_core::types::wire;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Local::now().year())
}

/// Formats an API date as `dd/mm/aaaa`. Anything else passes through.
///
/// Usage in templates: `{{ evento.data|data_br }}`
#[askama::filter_fn]
pub fn data_br(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(wire::parse_date(&raw).map_or(raw, |date| date.format("%d/%m/%Y").to_string()))
}

/// Formats an API time as `HHhMM`. Anything else passes through.
///
/// Usage in templates: `{{ horario.horario|hora }}`
#[askama::filter_fn]
pub fn hora(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(wire::parse_time(&raw).map_or(raw, |time| time.format("%Hh%M").to_string()))
}
