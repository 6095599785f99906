//! Browser session → store registry.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::api::{Credential, ParishApi};
use crate::services::auth::probe_session;

use super::store::SessionStore;

/// Maps browser-session IDs to their [`SessionStore`].
///
/// The first lookup for an ID creates the store in the loading state and
/// starts the bootstrap probe. Concurrent first requests for the same ID
/// share one initialization, so the probe runs exactly once per entry.
/// Entries are evicted after `idle` without access.
#[derive(Clone)]
pub struct SessionRegistry {
    stores: Cache<Uuid, SessionStore>,
    api: ParishApi,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(api: ParishApi, idle: Duration) -> Self {
        let stores = Cache::builder()
            .max_capacity(100_000)
            .time_to_idle(idle)
            .build();
        Self { stores, api }
    }

    /// Store for `id`, bootstrapping it on first use.
    pub async fn get_or_bootstrap(&self, id: Uuid, credential: Option<Credential>) -> SessionStore {
        let api = self.api.clone();
        self.stores
            .get_with(id, async move {
                let store = SessionStore::new();
                let target = store.clone();
                tokio::spawn(async move {
                    let user = probe_session(&api, credential.as_ref()).await;
                    target.resolve(user);
                });
                store
            })
            .await
    }

    /// Drop the store for `id`; the next request starts from scratch.
    pub async fn discard(&self, id: &Uuid) {
        self.stores.invalidate(id).await;
    }
}
