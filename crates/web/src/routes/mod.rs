//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Home page
//! GET  /avisos                     - Notices (?categoria=)
//! GET  /eventos                    - Events (?tipo=)
//! POST /eventos/{id}/inscricao     - Register for an event
//! GET  /horarios                   - Mass schedule by weekday
//! GET  /contatos                   - Contact form
//! POST /contatos                   - Send contact message
//!
//! # Auth
//! GET  /auth                       - Login page
//! POST /auth                       - Login action (rate limited)
//! POST /auth/logout                - Logout action
//!
//! # Back-office (guarded)
//! GET  /admin                      - Dashboard
//! *    /admin/{agenda,eventos,avisos,horarios}/...  - CRUD screens
//! GET  /admin/eventos/{id}/inscritos               - Event registrations
//! *    /admin/membros/...          - Admin accounts (admin only)
//! ```

pub mod admin;
pub mod auth;
pub mod avisos;
pub mod contatos;
pub mod eventos;
pub mod home;
pub mod horarios;

use axum::{
    Router,
    routing::{get, post},
};

use paroquia_core::UserRecord;

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Header navigation data for public pages.
#[derive(Debug, Clone)]
pub struct SiteNav {
    /// Slug of the current page, for highlighting.
    pub active: &'static str,
    /// Signed-in user, if the session already knows one.
    pub user: Option<UserRecord>,
}

impl SiteNav {
    #[must_use]
    pub const fn new(active: &'static str, user: Option<UserRecord>) -> Self {
        Self { active, user }
    }
}

/// Outcome notice shown above a form or next to a list item.
#[derive(Debug, Clone)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Create the auth routes router.
fn auth_routes(rate_limit: bool) -> Router<AppState> {
    let login = post(auth::login);
    let login = if rate_limit {
        login.layer(login_rate_limiter())
    } else {
        login
    };

    Router::new()
        .route("/", get(auth::login_page).merge(login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the site.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/avisos", get(avisos::index))
        .route("/eventos", get(eventos::index))
        .route("/eventos/{id}/inscricao", post(eventos::register))
        .route("/horarios", get(horarios::index))
        .route("/contatos", get(contatos::page).post(contatos::send))
        .nest("/auth", auth_routes(state.config().rate_limit))
        .nest("/admin", admin::routes(state))
}
