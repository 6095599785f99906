//! Notices screen.

use paroquia_core::records::{Aviso, AvisoForm, AvisoPayload, FormError, aviso};

use crate::api::resources::Avisos;
use crate::components::{DataTableConfig, FormField, TableColumn, TableFilter, TableRow};

use super::crud::AdminScreen;
use super::date_cell;

pub struct AvisosScreen;

impl AdminScreen for AvisosScreen {
    type Api = Avisos;
    type Form = AvisoForm;

    const SLUG: &'static str = "avisos";
    const TITLE: &'static str = "Avisos";
    const NOUN: &'static str = "aviso";

    fn table() -> DataTableConfig {
        DataTableConfig::new("avisos")
            .column(TableColumn::new("titulo", "Título"))
            .column(TableColumn::compact("categoria", "Categoria"))
            .column(TableColumn::compact("data", "Data"))
            .column(TableColumn::new("url", "Link"))
            .filter(TableFilter::select("filtro", "Categoria", &aviso::AVISO_CATEGORIAS))
            .empty_state("Nenhum aviso publicado", None)
    }

    fn row(aviso: &Aviso) -> TableRow {
        TableRow::new(
            aviso.id,
            vec![
                aviso.titulo.clone(),
                aviso.categoria.clone(),
                date_cell(aviso.data),
                aviso.url.clone().unwrap_or_default(),
            ],
        )
    }

    fn label(aviso: &Aviso) -> String {
        aviso.titulo.clone()
    }

    fn fields(form: &AvisoForm, _editing: bool) -> Vec<FormField> {
        vec![
            FormField::text("titulo", "Título", &form.titulo).required(),
            FormField::select("categoria", "Categoria", &aviso::AVISO_CATEGORIAS, &form.categoria)
                .required(),
            FormField::date("data", "Data", &form.data).required(),
            FormField::url("url", "Link", &form.url).hint("Opcional. Página com mais informações."),
            FormField::textarea("descricao", "Descrição", &form.descricao),
        ]
    }

    fn edit_form(aviso: &Aviso) -> AvisoForm {
        AvisoForm::from(aviso)
    }

    fn validate_create(form: &AvisoForm) -> Result<AvisoPayload, FormError> {
        form.validate()
    }

    fn category(aviso: &Aviso) -> Option<&str> {
        Some(&aviso.categoria)
    }

    fn sort(avisos: &mut [Aviso]) {
        aviso::sort_newest_first(avisos);
    }
}
