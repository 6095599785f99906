//! Events route handlers.
//!
//! The public list shows each event's capacity counter and a registration
//! form. A full event is refused here without calling the parish API; the
//! API enforces the same rule and answers 403 when an event fills up between
//! page load and submit.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use paroquia_core::records::{Evento, InscricaoForm, evento};
use paroquia_core::{Capacity, EventoId};

use crate::api::resources::Eventos;
use crate::components::TableFilter;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::{Notice, SiteNav};
use crate::services::{CaptchaWidget, captcha};
use crate::state::AppState;

/// Shown when registering for an event with no spots left.
pub const EVENT_FULL: &str = "As vagas para este evento já estão esgotadas.";

const REGISTERED: &str = "Inscrição realizada com sucesso!";

#[derive(Debug, Default, Deserialize)]
pub struct EventosQuery {
    pub tipo: Option<String>,
    /// Event just registered for.
    pub inscrito: Option<i64>,
}

/// Registration form as posted, CAPTCHA field included.
#[derive(Debug, Deserialize)]
pub struct RegistrationSubmission {
    #[serde(flatten)]
    pub form: InscricaoForm,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl RegistrationSubmission {
    /// Category filter the visitor was browsing, carried in a hidden field.
    fn tipo(&self) -> Option<String> {
        self.extra.get("tipo").filter(|t| !t.is_empty()).cloned()
    }
}

/// One event on the public list.
#[derive(Debug, Clone)]
pub struct EventoCard {
    pub evento: Evento,
    pub capacity: Capacity,
    pub notice: Option<Notice>,
    /// Values to refill the registration form with.
    pub form: InscricaoForm,
}

impl EventoCard {
    fn new(evento: Evento) -> Self {
        Self {
            capacity: evento.capacity(),
            evento,
            notice: None,
            form: InscricaoForm::default(),
        }
    }
}

/// Events page template.
#[derive(Template, WebTemplate)]
#[template(path = "eventos.html")]
pub struct EventosTemplate {
    pub nav: SiteNav,
    pub cards: Vec<EventoCard>,
    pub tipos: TableFilter,
    /// Active category filter, kept across a registration post.
    pub tipo: Option<String>,
    pub error: Option<String>,
    pub captcha: Option<CaptchaWidget>,
}

fn page(
    state: &AppState,
    user: Option<paroquia_core::UserRecord>,
    eventos: Vec<Evento>,
    tipo: Option<&str>,
) -> EventosTemplate {
    let mut tipos = TableFilter::select("tipo", "Categoria", &evento::EVENTO_TIPOS);
    tipos.apply(tipo);

    EventosTemplate {
        nav: SiteNav::new("eventos", user),
        cards: cards(eventos, tipo),
        tipos,
        tipo: tipo.map(String::from),
        error: None,
        captcha: CaptchaWidget::from_config(state.config().captcha.as_ref()),
    }
}

fn cards(mut eventos: Vec<Evento>, tipo: Option<&str>) -> Vec<EventoCard> {
    if let Some(tipo) = tipo {
        eventos.retain(|e| e.tipo == tipo);
    }
    evento::sort_chronologically(&mut eventos);
    eventos.into_iter().map(EventoCard::new).collect()
}

/// Display events with their capacity counters.
#[instrument(skip_all, fields(tipo = ?query.tipo))]
pub async fn index(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<EventosQuery>,
) -> EventosTemplate {
    let tipo = query.tipo.filter(|t| !t.is_empty());

    match state.feeds().eventos.current(state.api()).await {
        Ok(eventos) => {
            let mut template = page(&state, user, eventos, tipo.as_deref());
            if let Some(id) = query.inscrito.map(EventoId::new) {
                attach_notice(&mut template, id, Notice::success(REGISTERED), None);
            }
            template
        }
        Err(e) => {
            warn!(error = %e, "Failed to load events");
            let mut template = page(&state, user, vec![], tipo.as_deref());
            template.error = Some(e.user_message("Não foi possível carregar os eventos."));
            template
        }
    }
}

/// Register a visitor for an event.
///
/// The CAPTCHA and the form fields are checked before anything reaches the
/// parish API. Every rejection re-renders the list with the message next to
/// the event and the form refilled; success redirects back to the list.
#[instrument(skip_all, fields(evento = id))]
pub async fn register(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<i64>,
    Form(submission): Form<RegistrationSubmission>,
) -> Result<Response> {
    let id = EventoId::new(id);
    let api = state.api();
    let feed = &state.feeds().eventos;
    let tipo = submission.tipo();
    let config = state.config().captcha.as_ref();

    let checked = captcha::submitted(config, &submission.extra)
        .take(config.is_some())
        .map_err(|e| e.to_string())
        .and_then(|_| submission.form.validate().map_err(|e| e.to_string()));
    let payload = match checked {
        Ok(payload) => payload,
        Err(message) => {
            // Shown over the last polled list; no fetch for a rejected form.
            let eventos = feed.snapshot().await.unwrap_or_default();
            let template = page(&state, user, eventos, tipo.as_deref());
            return Ok(rejected(template, id, message, submission.form).into_response());
        }
    };

    // Capacity is checked against a fresh list, not the polled one.
    let eventos = match api.list::<Eventos>(None).await {
        Ok(eventos) => eventos,
        Err(e) => {
            warn!(error = %e, "Failed to load events for registration");
            let eventos = feed.snapshot().await.unwrap_or_default();
            let template = page(&state, user, eventos, tipo.as_deref());
            let message = e.user_message("Não foi possível concluir a inscrição.");
            return Ok(rejected(template, id, message, submission.form).into_response());
        }
    };
    let Some(evento) = eventos.iter().find(|e| e.id == id) else {
        return Err(AppError::NotFound(format!("evento {id}")));
    };

    let rejection = if evento.capacity().is_full() {
        Some(EVENT_FULL.to_string())
    } else {
        match api.register(id, &payload).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Registration rejected");
                Some(e.user_message("Não foi possível concluir a inscrição."))
            }
        }
    };

    if let Some(message) = rejection {
        let template = page(&state, user, eventos, tipo.as_deref());
        return Ok(rejected(template, id, message, submission.form).into_response());
    }

    info!("Registration accepted");
    // The counter on the page we redirect to must include this registration.
    if let Err(e) = feed.refresh(api).await {
        warn!(error = %e, "Failed to refresh events after registration");
    }
    Ok(Redirect::to(&registered_url(id, tipo.as_deref())).into_response())
}

/// Put a rejection next to its event, or above the list when the event is
/// not on the page.
fn rejected(
    mut template: EventosTemplate,
    id: EventoId,
    message: String,
    form: InscricaoForm,
) -> EventosTemplate {
    if template.cards.iter().any(|c| c.evento.id == id) {
        attach_notice(&mut template, id, Notice::error(message), Some(form));
    } else {
        template.error = Some(message);
    }
    template
}

fn registered_url(id: EventoId, tipo: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(tipo) = tipo {
        query.append_pair("tipo", tipo);
    }
    query.append_pair("inscrito", &id.to_string());
    format!("/eventos?{}#evento-{id}", query.finish())
}

fn attach_notice(template: &mut EventosTemplate, id: EventoId, notice: Notice, form: Option<InscricaoForm>) {
    if let Some(card) = template.cards.iter_mut().find(|c| c.evento.id == id) {
        card.notice = Some(notice);
        if let Some(form) = form {
            card.form = form;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn evento(id: i64, tipo: &str, data: &str) -> Evento {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "titulo": "Evento",
            "tipo": tipo,
            "data": data,
            "horario": "20:00:00",
            "tipo_vagas": "limitada",
            "numero_vagas": 10,
            "registered_count": 10,
        }))
        .unwrap()
    }

    #[test]
    fn test_cards_filter_sort_and_count() {
        let eventos = vec![
            evento(1, "festividade", "2025-08-01"),
            evento(2, "formacao", "2025-07-01"),
            evento(3, "festividade", "2025-06-01"),
        ];
        let cards = cards(eventos, Some("festividade"));
        let ids: Vec<i64> = cards.iter().map(|c| c.evento.id.as_i64()).collect();
        assert_eq!(ids, [3, 1]);
        assert!(cards.iter().all(|c| c.capacity.is_full()));
    }

    #[test]
    fn test_registered_url_keeps_filter() {
        let id = EventoId::new(5);
        assert_eq!(registered_url(id, None), "/eventos?inscrito=5#evento-5");
        assert_eq!(
            registered_url(id, Some("formacao")),
            "/eventos?tipo=formacao&inscrito=5#evento-5"
        );
    }

    #[test]
    fn test_tipo_read_from_hidden_field() {
        let submission: RegistrationSubmission = serde_json::from_value(serde_json::json!({
            "nome": "Ana",
            "telefone": "1199",
            "tipo": "festividade",
        }))
        .unwrap();
        assert_eq!(submission.tipo().as_deref(), Some("festividade"));
        assert_eq!(submission.form.nome, "Ana");

        let submission: RegistrationSubmission =
            serde_json::from_value(serde_json::json!({ "nome": "Ana", "tipo": "" })).unwrap();
        assert!(submission.tipo().is_none());
    }
}
