//! Events screen and the per-event registration list.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use paroquia_core::records::{Evento, EventoForm, EventoPayload, FormError, Inscricao, VacancyKind, evento};
use paroquia_core::{Capacity, EventoId};

use crate::api::resources::Eventos;
use crate::components::{DataTableConfig, FormField, TableColumn, TableFilter, TableRow};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::state::AppState;

use super::crud::{self, AdminScreen};
use super::{AdminNav, date_cell, time_cell};

const VACANCY_OPTIONS: [(&str, &str); 2] = [("aberta", "Aberta"), ("limitada", "Limitada")];

pub struct EventosScreen;

/// "12/30", or just "12" for open events.
fn capacity_cell(capacity: Capacity) -> String {
    match capacity.vacancy {
        Some(vacancy) => format!("{}/{vacancy}", capacity.registered),
        None => capacity.registered.to_string(),
    }
}

impl AdminScreen for EventosScreen {
    type Api = Eventos;
    type Form = EventoForm;

    const SLUG: &'static str = "eventos";
    const TITLE: &'static str = "Eventos";
    const NOUN: &'static str = "evento";

    fn table() -> DataTableConfig {
        DataTableConfig::new("eventos")
            .column(TableColumn::new("titulo", "Título"))
            .column(TableColumn::compact("tipo", "Categoria"))
            .column(TableColumn::compact("data", "Data"))
            .column(TableColumn::compact("horario", "Horário"))
            .column(TableColumn::new("local", "Local"))
            .column(TableColumn::compact("inscritos", "Inscritos"))
            .filter(TableFilter::select("filtro", "Categoria", &evento::EVENTO_TIPOS))
            .empty_state("Nenhum evento cadastrado", Some("Cadastre o primeiro evento."))
    }

    fn row(evento: &Evento) -> TableRow {
        TableRow::new(
            evento.id,
            vec![
                evento.titulo.clone(),
                evento.tipo.clone(),
                date_cell(evento.data),
                time_cell(evento.horario),
                evento.local.clone(),
                capacity_cell(evento.capacity()),
            ],
        )
        .link("Inscritos", format!("/admin/eventos/{}/inscritos", evento.id))
    }

    fn label(evento: &Evento) -> String {
        format!("{} ({})", evento.titulo, date_cell(evento.data))
    }

    fn fields(form: &EventoForm, _editing: bool) -> Vec<FormField> {
        let tipo_vagas = if form.tipo_vagas.is_empty() {
            VacancyKind::Aberta.as_str()
        } else {
            form.tipo_vagas.as_str()
        };
        vec![
            FormField::text("titulo", "Título", &form.titulo).required(),
            FormField::select("tipo", "Categoria", &evento::EVENTO_TIPOS, &form.tipo).required(),
            FormField::date("data", "Data", &form.data).required(),
            FormField::time("horario", "Horário", &form.horario).required(),
            FormField::text("local", "Local", &form.local).required(),
            FormField::select("tipo_vagas", "Vagas", &VACANCY_OPTIONS, tipo_vagas).required(),
            FormField::number("numero_vagas", "Número de vagas", &form.numero_vagas)
                .hint("Obrigatório quando as vagas são limitadas."),
            FormField::textarea("descricao", "Descrição", &form.descricao),
        ]
    }

    fn edit_form(evento: &Evento) -> EventoForm {
        EventoForm::from(evento)
    }

    fn validate_create(form: &EventoForm) -> std::result::Result<EventoPayload, FormError> {
        form.validate()
    }

    fn category(evento: &Evento) -> Option<&str> {
        Some(&evento.tipo)
    }

    fn sort(eventos: &mut [Evento]) {
        evento::sort_chronologically(eventos);
    }
}

/// Registrations page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/inscritos.html")]
pub struct InscritosTemplate {
    pub nav: AdminNav,
    pub evento: Evento,
    pub capacity: Capacity,
    pub inscricoes: Vec<Inscricao>,
    pub error: Option<String>,
}

/// List who registered for one event.
#[instrument(skip_all, fields(evento = id))]
pub async fn inscritos(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    let nav = AdminNav::new(EventosScreen::SLUG, current.user);
    let credential = current.credential.as_ref();

    let evento = match crud::find::<EventosScreen>(&state, &nav, id, credential).await? {
        Ok(evento) => evento,
        Err(page) => return Ok(page),
    };
    let id = EventoId::new(id);

    let (inscricoes, error) = match state.api().inscricoes(id, credential).await {
        Ok(inscricoes) => (inscricoes, None),
        Err(e) => (
            vec![],
            Some(e.user_message("Não foi possível carregar as inscrições.")),
        ),
    };

    Ok(InscritosTemplate {
        nav,
        capacity: evento.capacity(),
        evento,
        inscricoes,
        error,
    }
    .into_response())
}
