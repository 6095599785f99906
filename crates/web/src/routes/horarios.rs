//! Mass schedule route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::{instrument, warn};

use paroquia_core::records::{WeekdayGroup, group_by_weekday};

use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::SiteNav;
use crate::state::AppState;

/// Schedule page template.
#[derive(Template, WebTemplate)]
#[template(path = "horarios.html")]
pub struct HorariosTemplate {
    pub nav: SiteNav,
    pub dias: Vec<WeekdayGroup>,
    pub error: Option<String>,
    pub refresh_secs: u64,
}

/// Display the schedule grouped by weekday in calendar order.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> HorariosTemplate {
    let (dias, error) = match state.feeds().horarios.current(state.api()).await {
        Ok(horarios) => (group_by_weekday(horarios), None),
        Err(e) => {
            warn!(error = %e, "Failed to load schedule");
            (vec![], Some(e.user_message("Não foi possível carregar os horários.")))
        }
    };

    HorariosTemplate {
        nav: SiteNav::new("horarios", user),
        dias,
        error,
        refresh_secs: state.config().feed_poll_interval.as_secs(),
    }
}
