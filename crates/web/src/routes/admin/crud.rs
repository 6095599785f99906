//! Generic back-office CRUD screens.
//!
//! Every collection screen works the same way: list, create form, edit
//! form, delete confirmation. An [`AdminScreen`] supplies the parts that
//! differ (columns, fields, validation) and [`crud_routes`] wires the
//! handlers below for it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use paroquia_core::records::FormError;

use crate::api::{Credential, Resource};
use crate::components::{DataTableConfig, FormField, TableRow};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireUser;
use crate::routes::Notice;
use crate::routes::admin::AdminNav;
use crate::state::AppState;

pub type Record<S> = <<S as AdminScreen>::Api as Resource>::Record;
pub type Payload<S> = <<S as AdminScreen>::Api as Resource>::Payload;

/// One back-office collection screen.
pub trait AdminScreen: Send + Sync + 'static {
    /// Parish API collection behind the screen.
    type Api: Resource;
    /// Raw form fields as posted.
    type Form: DeserializeOwned + Default + Send + 'static;

    /// URL segment under `/admin`.
    const SLUG: &'static str;
    /// Page title.
    const TITLE: &'static str;
    /// Singular noun for headings ("Novo aviso").
    const NOUN: &'static str;

    fn table() -> DataTableConfig;
    fn row(record: &Record<Self>) -> TableRow;
    /// Short description used in the delete confirmation.
    fn label(record: &Record<Self>) -> String;
    fn fields(form: &Self::Form, editing: bool) -> Vec<FormField>;
    fn edit_form(record: &Record<Self>) -> Self::Form;

    /// Check a create form.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    fn validate_create(form: &Self::Form) -> std::result::Result<Payload<Self>, FormError>;

    /// Check an edit form. Same rules as creation unless overridden.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    fn validate_update(form: &Self::Form) -> std::result::Result<Payload<Self>, FormError> {
        Self::validate_create(form)
    }

    /// Value matched against the table's category filter.
    fn category(_record: &Record<Self>) -> Option<&str> {
        None
    }

    /// Display order of the list.
    fn sort(_records: &mut [Record<Self>]) {}
}

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Outcome of the action that redirected here.
    pub ok: Option<String>,
    pub filtro: Option<String>,
}

/// List page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/list.html")]
pub struct ListTemplate {
    pub nav: AdminNav,
    pub title: &'static str,
    pub slug: &'static str,
    pub noun: &'static str,
    pub table: DataTableConfig,
    pub rows: Vec<TableRow>,
    pub notice: Option<Notice>,
}

/// Create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/form.html")]
pub struct FormTemplate {
    pub nav: AdminNav,
    pub title: &'static str,
    pub slug: &'static str,
    pub heading: String,
    pub action: String,
    pub fields: Vec<FormField>,
    pub error: Option<String>,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub nav: AdminNav,
    pub title: &'static str,
    pub slug: &'static str,
    pub noun: &'static str,
    pub label: String,
    pub action: String,
    pub error: Option<String>,
}

fn flash(ok: Option<&str>) -> Option<Notice> {
    let message = match ok? {
        "criado" => "Registro criado com sucesso.",
        "atualizado" => "Registro atualizado com sucesso.",
        "excluido" => "Registro excluído com sucesso.",
        _ => return None,
    };
    Some(Notice::success(message))
}

fn list_url<S: AdminScreen>(outcome: &str) -> String {
    format!("/admin/{}?ok={outcome}", S::SLUG)
}

fn form_page<S: AdminScreen>(
    nav: AdminNav,
    form: &S::Form,
    editing: Option<i64>,
    error: Option<String>,
) -> FormTemplate {
    let (heading, action) = match editing {
        Some(id) => (
            format!("Editar {}", S::NOUN),
            format!("/admin/{}/{id}", S::SLUG),
        ),
        None => (format!("Novo {}", S::NOUN), format!("/admin/{}", S::SLUG)),
    };
    FormTemplate {
        nav,
        title: S::TITLE,
        slug: S::SLUG,
        heading,
        action,
        fields: S::fields(form, editing.is_some()),
        error,
    }
}

/// Look up one record for a page that needs it.
///
/// A missing record is a 404. A failed API call renders the list page with
/// the reason instead, so the back-office stays usable.
pub(crate) async fn find<S: AdminScreen>(
    state: &AppState,
    nav: &AdminNav,
    id: i64,
    credential: Option<&Credential>,
) -> Result<std::result::Result<Record<S>, Response>> {
    match state.api().find::<S::Api>(id.into(), credential).await {
        Ok(Some(record)) => Ok(Ok(record)),
        Ok(None) => Err(AppError::NotFound(format!("{} {id}", S::SLUG))),
        Err(e) => {
            warn!(error = %e, "Failed to load record");
            let message = e.user_message("Não foi possível carregar o registro.");
            Ok(Err(unavailable::<S>(nav.clone(), message).into_response()))
        }
    }
}

/// The list page with no rows and an error notice.
fn unavailable<S: AdminScreen>(nav: AdminNav, message: String) -> ListTemplate {
    ListTemplate {
        nav,
        title: S::TITLE,
        slug: S::SLUG,
        noun: S::NOUN,
        table: S::table(),
        rows: vec![],
        notice: Some(Notice::error(message)),
    }
}

/// List the collection.
///
/// A failed fetch shows an empty table with the reason.
#[instrument(skip_all, fields(screen = S::SLUG))]
pub async fn list<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Query(query): Query<ListQuery>,
) -> ListTemplate {
    let filtro = query.filtro.as_deref().filter(|f| !f.is_empty());
    let mut table = S::table();
    if let Some(filter) = table.filter.as_mut() {
        filter.apply(filtro);
    }

    let mut notice = flash(query.ok.as_deref());
    let rows = match state.api().list::<S::Api>(current.credential.as_ref()).await {
        Ok(mut records) => {
            if let Some(filtro) = filtro {
                records.retain(|r| S::category(r) == Some(filtro));
            }
            S::sort(&mut records);
            records.iter().map(S::row).collect()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load list");
            notice = Some(Notice::error(
                e.user_message("Não foi possível carregar os registros."),
            ));
            vec![]
        }
    };

    ListTemplate {
        nav: AdminNav::new(S::SLUG, current.user),
        title: S::TITLE,
        slug: S::SLUG,
        noun: S::NOUN,
        table,
        rows,
        notice,
    }
}

/// Empty create form.
pub async fn new<S: AdminScreen>(RequireUser(current): RequireUser) -> FormTemplate {
    form_page::<S>(AdminNav::new(S::SLUG, current.user), &S::Form::default(), None, None)
}

/// Create a record.
#[instrument(skip_all, fields(screen = S::SLUG))]
pub async fn create<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Form(form): Form<S::Form>,
) -> Response {
    let nav = AdminNav::new(S::SLUG, current.user);

    let payload = match S::validate_create(&form) {
        Ok(payload) => payload,
        Err(e) => return form_page::<S>(nav, &form, None, Some(e.to_string())).into_response(),
    };

    match state
        .api()
        .create::<S::Api>(&payload, current.credential.as_ref())
        .await
    {
        Ok(()) => {
            info!("Record created");
            Redirect::to(&list_url::<S>("criado")).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Create rejected");
            let message = e.user_message("Não foi possível salvar o registro.");
            form_page::<S>(nav, &form, None, Some(message)).into_response()
        }
    }
}

/// Edit form prefilled from the stored record.
#[instrument(skip_all, fields(screen = S::SLUG, id = id))]
pub async fn edit<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    let nav = AdminNav::new(S::SLUG, current.user);
    let record = match find::<S>(&state, &nav, id, current.credential.as_ref()).await? {
        Ok(record) => record,
        Err(page) => return Ok(page),
    };
    Ok(form_page::<S>(nav, &S::edit_form(&record), Some(id), None).into_response())
}

/// Replace a record.
#[instrument(skip_all, fields(screen = S::SLUG, id = id))]
pub async fn update<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<i64>,
    Form(form): Form<S::Form>,
) -> Response {
    let nav = AdminNav::new(S::SLUG, current.user);

    let payload = match S::validate_update(&form) {
        Ok(payload) => payload,
        Err(e) => return form_page::<S>(nav, &form, Some(id), Some(e.to_string())).into_response(),
    };

    match state
        .api()
        .update::<S::Api>(id.into(), &payload, current.credential.as_ref())
        .await
    {
        Ok(()) => {
            info!("Record updated");
            Redirect::to(&list_url::<S>("atualizado")).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Update rejected");
            let message = e.user_message("Não foi possível salvar o registro.");
            form_page::<S>(nav, &form, Some(id), Some(message)).into_response()
        }
    }
}

/// Ask before deleting.
#[instrument(skip_all, fields(screen = S::SLUG, id = id))]
pub async fn confirm_delete<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    let nav = AdminNav::new(S::SLUG, current.user);
    let record = match find::<S>(&state, &nav, id, current.credential.as_ref()).await? {
        Ok(record) => record,
        Err(page) => return Ok(page),
    };
    Ok(ConfirmDeleteTemplate {
        nav,
        title: S::TITLE,
        slug: S::SLUG,
        noun: S::NOUN,
        label: S::label(&record),
        action: format!("/admin/{}/{id}/excluir", S::SLUG),
        error: None,
    }
    .into_response())
}

/// Delete a record. Only reachable from the confirmation page's form.
#[instrument(skip_all, fields(screen = S::SLUG, id = id))]
pub async fn delete<S: AdminScreen>(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<i64>,
) -> Response {
    match state
        .api()
        .delete::<S::Api>(id.into(), current.credential.as_ref())
        .await
    {
        Ok(()) => {
            info!("Record deleted");
            Redirect::to(&list_url::<S>("excluido")).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Delete rejected");
            ConfirmDeleteTemplate {
                nav: AdminNav::new(S::SLUG, current.user),
                title: S::TITLE,
                slug: S::SLUG,
                noun: S::NOUN,
                label: format!("{} #{id}", S::NOUN),
                action: format!("/admin/{}/{id}/excluir", S::SLUG),
                error: Some(e.user_message("Não foi possível excluir o registro.")),
            }
            .into_response()
        }
    }
}

/// Routes of one screen, relative to `/admin`.
pub fn crud_routes<S: AdminScreen>() -> Router<AppState> {
    let base = format!("/{}", S::SLUG);
    Router::new()
        .route(&base, get(list::<S>).post(create::<S>))
        .route(&format!("{base}/novo"), get(new::<S>))
        .route(&format!("{base}/{{id}}"), post(update::<S>))
        .route(&format!("{base}/{{id}}/editar"), get(edit::<S>))
        .route(
            &format!("{base}/{{id}}/excluir"),
            get(confirm_delete::<S>).post(delete::<S>),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_messages() {
        assert!(flash(Some("criado")).is_some_and(|n| n.success));
        assert!(flash(Some("qualquer")).is_none());
        assert!(flash(None).is_none());
    }
}
