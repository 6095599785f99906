//! Back-office dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::{instrument, warn};

use paroquia_core::records::DashboardSummary;

use crate::filters;
use crate::middleware::RequireUser;
use crate::state::AppState;

use super::AdminNav;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: AdminNav,
    pub summary: DashboardSummary,
    pub error: Option<String>,
}

/// Figures and recent activity for the signed-in user.
///
/// A failed fetch still renders the page, with zeros and the reason.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, RequireUser(current): RequireUser) -> DashboardTemplate {
    let (summary, error) = match state.api().dashboard(current.credential.as_ref()).await {
        Ok(summary) => (summary, None),
        Err(e) => {
            warn!(error = %e, "Failed to load dashboard");
            (
                DashboardSummary::default(),
                Some(e.user_message("Não foi possível carregar o painel.")),
            )
        }
    };

    DashboardTemplate {
        nav: AdminNav::new("", current.user),
        summary,
        error,
    }
}
