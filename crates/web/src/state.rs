//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, ParishApi};
use crate::config::WebConfig;
use crate::services::feeds::Feeds;
use crate::session::SessionRegistry;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    api: ParishApi,
    sessions: SessionRegistry,
    feeds: Feeds,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the parish API client cannot be built.
    pub fn new(config: WebConfig) -> Result<Self, ApiError> {
        let api = ParishApi::new(&config.api_url, config.api_timeout)?;
        let sessions = SessionRegistry::new(api.clone(), config.session_idle);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                sessions,
                feeds: Feeds::default(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Parish API client.
    #[must_use]
    pub fn api(&self) -> &ParishApi {
        &self.inner.api
    }

    /// Browser session → store registry.
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }

    /// Public list feeds.
    #[must_use]
    pub fn feeds(&self) -> &Feeds {
        &self.inner.feeds
    }

    /// Start polling the public feeds in the background.
    pub fn start_feed_polling(&self) {
        self.inner
            .feeds
            .start(&self.inner.api, self.inner.config.feed_poll_interval);
    }
}
