//! Notices route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{instrument, warn};

use paroquia_core::records::{Aviso, aviso};

use crate::components::TableFilter;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::SiteNav;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AvisosQuery {
    pub categoria: Option<String>,
}

/// Notices page template.
#[derive(Template, WebTemplate)]
#[template(path = "avisos.html")]
pub struct AvisosTemplate {
    pub nav: SiteNav,
    pub avisos: Vec<Aviso>,
    pub categorias: TableFilter,
    pub error: Option<String>,
    pub refresh_secs: u64,
}

/// Display notices, newest first, optionally for one category.
#[instrument(skip_all, fields(categoria = ?query.categoria))]
pub async fn index(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<AvisosQuery>,
) -> AvisosTemplate {
    let categoria = query.categoria.filter(|c| !c.is_empty());
    let mut categorias = TableFilter::select("categoria", "Categoria", &aviso::AVISO_CATEGORIAS);
    categorias.apply(categoria.as_deref());

    let (avisos, error) = match state.feeds().avisos.current(state.api()).await {
        Ok(avisos) => (select(avisos, categoria.as_deref()), None),
        Err(e) => {
            warn!(error = %e, "Failed to load notices");
            (vec![], Some(e.user_message("Não foi possível carregar os avisos.")))
        }
    };

    AvisosTemplate {
        nav: SiteNav::new("avisos", user),
        avisos,
        categorias,
        error,
        refresh_secs: state.config().feed_poll_interval.as_secs(),
    }
}

fn select(mut avisos: Vec<Aviso>, categoria: Option<&str>) -> Vec<Aviso> {
    if let Some(categoria) = categoria {
        avisos.retain(|a| a.categoria == categoria);
    }
    aviso::sort_newest_first(&mut avisos);
    avisos
}
