//! Agenda screen.

use paroquia_core::records::{AgendaForm, AgendaItem, AgendaPayload, FormError, agenda};

use crate::api::resources::Agenda;
use crate::components::{DataTableConfig, FormField, TableColumn, TableFilter, TableRow};

use super::crud::AdminScreen;
use super::{date_cell, time_cell};

pub struct AgendaScreen;

impl AdminScreen for AgendaScreen {
    type Api = Agenda;
    type Form = AgendaForm;

    const SLUG: &'static str = "agenda";
    const TITLE: &'static str = "Agenda";
    const NOUN: &'static str = "compromisso";

    fn table() -> DataTableConfig {
        DataTableConfig::new("agenda")
            .column(TableColumn::new("titulo", "Título"))
            .column(TableColumn::compact("tipo", "Tipo"))
            .column(TableColumn::compact("data", "Data"))
            .column(TableColumn::compact("horario", "Horário"))
            .column(TableColumn::new("local", "Local"))
            .filter(TableFilter::select("filtro", "Tipo", &agenda::AGENDA_TIPOS))
            .empty_state("Nenhum compromisso na agenda", Some("Cadastre o primeiro compromisso."))
    }

    fn row(item: &AgendaItem) -> TableRow {
        TableRow::new(
            item.id,
            vec![
                item.titulo.clone(),
                item.tipo.clone(),
                date_cell(item.data),
                time_cell(item.horario),
                item.local.clone(),
            ],
        )
    }

    fn label(item: &AgendaItem) -> String {
        format!("{} ({})", item.titulo, date_cell(item.data))
    }

    fn fields(form: &AgendaForm, _editing: bool) -> Vec<FormField> {
        vec![
            FormField::text("titulo", "Título", &form.titulo).required(),
            FormField::select("tipo", "Tipo", &agenda::AGENDA_TIPOS, &form.tipo).required(),
            FormField::date("data", "Data", &form.data).required(),
            FormField::time("horario", "Horário", &form.horario).required(),
            FormField::text("local", "Local", &form.local).required(),
            FormField::textarea("descricao", "Descrição", &form.descricao),
        ]
    }

    fn edit_form(item: &AgendaItem) -> AgendaForm {
        AgendaForm::from(item)
    }

    fn validate_create(form: &AgendaForm) -> Result<AgendaPayload, FormError> {
        form.validate()
    }

    fn category(item: &AgendaItem) -> Option<&str> {
        Some(&item.tipo)
    }

    fn sort(items: &mut [AgendaItem]) {
        items.sort_by_key(|i| (i.data, i.horario));
    }
}
