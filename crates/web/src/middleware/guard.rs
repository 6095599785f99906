//! Route guard for the back-office.
//!
//! Applied with `route_layer` so it only runs for matched routes. The
//! decision itself comes from [`GuardConfig::evaluate`]; this layer only
//! turns it into HTTP:
//!
//! - `Loading` - placeholder page that reloads itself, no redirect
//! - `Unauthenticated` - `303` to `/auth`
//! - `Forbidden` - `303` to `/`
//! - `Authorized` - [`CurrentUser`] inserted, request continues

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use paroquia_core::{GuardConfig, GuardDecision};

use crate::session::{ClientHandle, CurrentUser};
use crate::state::AppState;

/// Seconds between reloads of the placeholder page.
const LOADING_REFRESH_SECS: u64 = 1;

/// Placeholder shown while the session probe is still running.
#[derive(Template, WebTemplate)]
#[template(path = "guard/loading.html")]
pub struct LoadingTemplate {
    pub refresh_secs: u64,
}

/// Guard for routes any logged-in user may see.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    guard(GuardConfig::AUTHENTICATED, &state, request, next).await
}

/// Guard for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    guard(GuardConfig::ADMIN_ONLY, &state, request, next).await
}

async fn guard(config: GuardConfig, state: &AppState, mut request: Request, next: Next) -> Response {
    let Some(client) = request.extensions().get::<ClientHandle>().cloned() else {
        return Redirect::to("/auth").into_response();
    };

    let snapshot = client.store.wait_resolved(state.config().guard_wait).await;
    let decision = config.evaluate(&snapshot);
    debug!(?decision, path = %request.uri().path(), "Route guard");

    match decision {
        GuardDecision::Loading => loading_page(),
        GuardDecision::Authorized => {
            if let Some(user) = snapshot.user() {
                request.extensions_mut().insert(CurrentUser {
                    user: user.clone(),
                    credential: client.credential,
                });
            }
            next.run(request).await
        }
        GuardDecision::Unauthenticated | GuardDecision::Forbidden => {
            let target = decision.redirect_target().unwrap_or("/auth");
            Redirect::to(target).into_response()
        }
    }
}

fn loading_page() -> Response {
    let mut response = LoadingTemplate {
        refresh_secs: LOADING_REFRESH_SECS,
    }
    .into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
