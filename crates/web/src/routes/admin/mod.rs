//! Back-office screens.
//!
//! Everything under `/admin` sits behind the session guard; the admin
//! account screen additionally requires the elevated role.

pub mod agenda;
pub mod avisos;
pub mod crud;
pub mod dashboard;
pub mod eventos;
pub mod horarios;
pub mod membros;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use chrono::{NaiveDate, NaiveTime};

use paroquia_core::UserRecord;

use crate::middleware::{require_admin, require_session};
use crate::state::AppState;

use crud::crud_routes;

/// Sidebar navigation data for back-office pages.
#[derive(Debug, Clone)]
pub struct AdminNav {
    /// Slug of the current screen ("" for the dashboard).
    pub active: &'static str,
    pub user: UserRecord,
}

impl AdminNav {
    #[must_use]
    pub const fn new(active: &'static str, user: UserRecord) -> Self {
        Self { active, user }
    }

    /// Whether the account screen link should be shown.
    #[must_use]
    pub fn shows_membros(&self) -> bool {
        self.user.is_admin()
    }
}

/// `dd/mm/YYYY` for table cells.
pub(crate) fn date_cell(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `HH:MM` for table cells.
pub(crate) fn time_cell(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Back-office router, relative to `/admin`.
pub fn routes(state: &AppState) -> Router<AppState> {
    let staff = Router::new()
        .route("/", get(dashboard::index))
        .merge(crud_routes::<agenda::AgendaScreen>())
        .merge(crud_routes::<eventos::EventosScreen>())
        .route("/eventos/{id}/inscritos", get(eventos::inscritos))
        .merge(crud_routes::<avisos::AvisosScreen>())
        .merge(crud_routes::<horarios::HorariosScreen>())
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let admins = crud_routes::<membros::MembrosScreen>()
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    staff.merge(admins)
}
