//! Background polling of the public lists.
//!
//! Each feed issues a fetch every poll interval without waiting for the
//! previous one. Fetches are numbered when issued and the shared
//! [`LatestSlot`] only accepts a response newer than the one it holds, so a
//! slow stale response never replaces fresher data.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use paroquia_core::{LatestSlot, Sequence};

use crate::api::resources::{Avisos, Eventos, Horarios};
use crate::api::{ApiResult, ParishApi, Resource};

/// Sequence-guarded cache of one public collection.
pub struct Feed<R: Resource> {
    slot: Arc<RwLock<LatestSlot<Vec<R::Record>>>>,
    issued: Arc<AtomicU64>,
    polling: Arc<AtomicBool>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for Feed<R> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            issued: Arc::clone(&self.issued),
            polling: Arc::clone(&self.polling),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Default for Feed<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Feed<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(LatestSlot::new())),
            issued: Arc::new(AtomicU64::new(0)),
            polling: Arc::new(AtomicBool::new(false)),
            _resource: PhantomData,
        }
    }

    /// Number the next fetch.
    fn issue(&self) -> Sequence {
        Sequence::new(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Apply a response if it is newer than the current one.
    pub async fn offer(&self, seq: Sequence, records: Vec<R::Record>) -> bool {
        self.slot.write().await.offer(seq, records)
    }

    /// Records from the newest applied fetch.
    pub async fn snapshot(&self) -> Option<Vec<R::Record>> {
        self.slot.read().await.get().cloned()
    }

    /// Issue one numbered fetch and offer its result.
    ///
    /// # Errors
    ///
    /// Returns error if the fetch fails; the slot keeps its records.
    pub async fn refresh(&self, api: &ParishApi) -> ApiResult<Vec<R::Record>> {
        let seq = self.issue();
        let records = api.list::<R>(None).await?;
        if !self.offer(seq, records.clone()).await {
            debug!(resource = R::PATH, seq = seq.get(), "Discarded stale feed response");
        }
        Ok(records)
    }

    /// Current records for a page.
    ///
    /// Served from the slot while the poller keeps it fresh; fetched directly
    /// before the first poll lands or when no poller runs.
    ///
    /// # Errors
    ///
    /// Returns error if a direct fetch fails.
    pub async fn current(&self, api: &ParishApi) -> ApiResult<Vec<R::Record>> {
        if self.polling.load(Ordering::Relaxed)
            && let Some(records) = self.snapshot().await
        {
            return Ok(records);
        }
        self.refresh(api).await
    }

    /// Spawn the poller. Calling this more than once has no effect.
    pub fn spawn_poller(&self, api: ParishApi, every: Duration) {
        if self.polling.swap(true, Ordering::Relaxed) {
            return;
        }

        let feed = self.clone();
        info!(resource = R::PATH, every_secs = every.as_secs(), "Starting feed poller");
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                let feed = feed.clone();
                let api = api.clone();
                tokio::spawn(async move {
                    if let Err(e) = feed.refresh(&api).await {
                        warn!(resource = R::PATH, error = %e, "Feed poll failed");
                    }
                });
            }
        });
    }
}

/// The public feeds.
#[derive(Clone, Default)]
pub struct Feeds {
    pub avisos: Feed<Avisos>,
    pub eventos: Feed<Eventos>,
    pub horarios: Feed<Horarios>,
}

impl Feeds {
    /// Start polling every feed.
    pub fn start(&self, api: &ParishApi, every: Duration) {
        self.avisos.spawn_poller(api.clone(), every);
        self.eventos.spawn_poller(api.clone(), every);
        self.horarios.spawn_poller(api.clone(), every);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use paroquia_core::HorarioId;
    use paroquia_core::records::Horario;

    use super::*;

    fn horario(id: i64) -> Horario {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "dia": "Domingo",
            "titulo": "Missa",
            "horario": "08:00:00",
            "local": "Matriz",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_sequences_increase() {
        let feed = Feed::<Horarios>::new();
        let first = feed.issue();
        let second = feed.issue();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let feed = Feed::<Horarios>::new();
        let older = feed.issue();
        let newer = feed.issue();

        assert!(feed.offer(newer, vec![horario(2)]).await);
        assert!(!feed.offer(older, vec![horario(1)]).await);

        let current = feed.snapshot().await.unwrap();
        assert_eq!(current[0].id, HorarioId::new(2));
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let feed = Feed::<Horarios>::new();
        let other = feed.clone();
        let seq = other.issue();
        other.offer(seq, vec![horario(3)]).await;
        assert_eq!(feed.snapshot().await.unwrap().len(), 1);
    }
}
