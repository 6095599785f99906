//! Extractors for the browser session.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use crate::session::{ClientHandle, CurrentUser};

/// Extractor for a route behind the guard.
///
/// The guard inserts [`CurrentUser`] once it authorizes the request; a
/// handler reached any other way redirects to the login view.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireUser(current): RequireUser) -> impl IntoResponse {
///     format!("Olá, {}!", current.user.first_name())
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Error returned when a guarded handler runs without an authorized user.
pub struct UserRejection;

impl IntoResponse for UserRejection {
    fn into_response(self) -> Response {
        Redirect::to("/auth").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = UserRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(Self)
            .ok_or(UserRejection)
    }
}

/// Extractor for the [`ClientHandle`] attached by the bootstrap middleware.
pub struct Client(pub ClientHandle);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClientHandle>()
            .cloned()
            .map(Self)
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Extractor for the signed-in user, if any, on public pages.
///
/// Never waits for the session probe: a still-loading session reads as
/// anonymous.
pub struct OptionalUser(pub Option<paroquia_core::UserRecord>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<ClientHandle>()
            .and_then(|client| client.store.snapshot().user().cloned());
        Ok(Self(user))
    }
}
