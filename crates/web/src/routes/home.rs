//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::{instrument, warn};

use paroquia_core::records::{Aviso, Evento, aviso, evento};

use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::SiteNav;
use crate::state::AppState;

/// How many upcoming events and recent notices the home page shows.
const HIGHLIGHTS: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: SiteNav,
    pub eventos: Vec<Evento>,
    pub avisos: Vec<Aviso>,
}

/// Display the home page.
///
/// A failing feed only empties its section.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> HomeTemplate {
    let api = state.api();

    let eventos = match state.feeds().eventos.current(api).await {
        Ok(eventos) => upcoming(eventos, chrono::Local::now().date_naive()),
        Err(e) => {
            warn!(error = %e, "Failed to load events for home page");
            vec![]
        }
    };

    let avisos = match state.feeds().avisos.current(api).await {
        Ok(mut avisos) => {
            aviso::sort_newest_first(&mut avisos);
            avisos.truncate(HIGHLIGHTS);
            avisos
        }
        Err(e) => {
            warn!(error = %e, "Failed to load notices for home page");
            vec![]
        }
    };

    HomeTemplate {
        nav: SiteNav::new("home", user),
        eventos,
        avisos,
    }
}

/// Next events from `today` on, soonest first.
fn upcoming(mut eventos: Vec<Evento>, today: chrono::NaiveDate) -> Vec<Evento> {
    eventos.retain(|e| e.data >= today);
    evento::sort_chronologically(&mut eventos);
    eventos.truncate(HIGHLIGHTS);
    eventos
}
