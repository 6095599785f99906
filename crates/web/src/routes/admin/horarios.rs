//! Mass schedule screen.

use paroquia_core::records::{FormError, Horario, HorarioForm, HorarioPayload, Weekday};

use crate::api::resources::Horarios;
use crate::components::{DataTableConfig, FormField, TableColumn, TableRow};

use super::crud::AdminScreen;
use super::time_cell;

pub struct HorariosScreen;

/// `(value, label)` pairs for the weekday select; both are the label the
/// API stores.
fn weekday_options() -> Vec<(&'static str, &'static str)> {
    Weekday::ALL.iter().map(|d| (d.label(), d.label())).collect()
}

impl AdminScreen for HorariosScreen {
    type Api = Horarios;
    type Form = HorarioForm;

    const SLUG: &'static str = "horarios";
    const TITLE: &'static str = "Horários";
    const NOUN: &'static str = "horário";

    fn table() -> DataTableConfig {
        DataTableConfig::new("horarios")
            .column(TableColumn::compact("dia", "Dia"))
            .column(TableColumn::compact("horario", "Horário"))
            .column(TableColumn::new("titulo", "Celebração"))
            .column(TableColumn::new("local", "Local"))
            .empty_state("Nenhum horário cadastrado", None)
    }

    fn row(horario: &Horario) -> TableRow {
        TableRow::new(
            horario.id,
            vec![
                horario.dia.clone(),
                time_cell(horario.horario),
                horario.titulo.clone(),
                horario.local.clone(),
            ],
        )
    }

    fn label(horario: &Horario) -> String {
        format!("{} - {} {}", horario.titulo, horario.dia, time_cell(horario.horario))
    }

    fn fields(form: &HorarioForm, _editing: bool) -> Vec<FormField> {
        vec![
            FormField::select("dia", "Dia da semana", &weekday_options(), &form.dia).required(),
            FormField::time("horario", "Horário", &form.horario).required(),
            FormField::text("titulo", "Celebração", &form.titulo).required(),
            FormField::text("local", "Local", &form.local).required(),
        ]
    }

    fn edit_form(horario: &Horario) -> HorarioForm {
        HorarioForm::from(horario)
    }

    fn validate_create(form: &HorarioForm) -> Result<HorarioPayload, FormError> {
        form.validate()
    }

    fn sort(horarios: &mut [Horario]) {
        horarios.sort_by_key(|h| (Weekday::parse(&h.dia).map_or(usize::MAX, |d| d as usize), h.horario));
    }
}
