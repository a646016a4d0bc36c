//! Event store facade
//!
//! `AppEvents` owns the ordered event list and its id index. The list is
//! hydrated from `events.json` on first access and served from memory
//! afterwards; every successful mutation rewrites the file.
//!
//! # Transactions
//!
//! ```text
//! lock ─► ensure hydrated ─► mutate list + index ─► save ─► unlock
//!                                                    │
//!                                                    └─ failed: reload from disk
//! ```
//!
//! The cache mutex is held for the whole transaction, so mutations are
//! strictly serialized and a failed save can never discard someone else's
//! change. Mutations run on their own task: dropping the caller's future
//! does not stop a transaction halfway between memory and disk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::ids::IdGenerator;
use crate::collection::{Handle, IdIndex, OrderedList};
use crate::persistence::{decode_events, JsonFile, StoreError, StoreResult};
use crate::settings::Settings;
use crate::types::{Event, EventId, EventPatch, WireEvent};

/// Hydrated in-memory state
#[derive(Debug, Default)]
struct EventCache {
    list: OrderedList<Event>,
    index: IdIndex,
    ids: IdGenerator,
}

impl EventCache {
    fn from_records(records: Vec<WireEvent>) -> Self {
        let mut cache = Self::default();

        // Ids generated for id-less records must clear every id in the file
        for id in records.iter().filter_map(WireEvent::stored_id) {
            cache.ids.observe(id);
        }

        for record in records {
            let event = record.into_event(|| cache.ids.next_id());

            match cache.index.get(event.id) {
                Some(existing) => {
                    warn!(id = event.id, "Duplicate event id in file, keeping the later record");
                    cache.replace(existing, event);
                }
                None => {
                    let id = event.id;
                    let handle = cache.list.append(event);
                    cache.index.set(id, handle);
                }
            }
        }
        cache
    }

    /// Update the record with `id` in place, or create a new one at the tail.
    ///
    /// An id of `0` counts as "no id".
    fn upsert(&mut self, id: Option<EventId>, patch: EventPatch) -> Event {
        let id = id.filter(|id| *id != 0);

        if let Some(id) = id {
            if let Some(old) = self.index.get(id) {
                if let Some(existing) = self.list.get(old) {
                    let merged = existing.merged(patch);
                    self.replace(old, merged.clone());
                    return merged;
                }
                self.index.delete(id);
            }
        }

        let id = match id {
            Some(id) => {
                self.ids.observe(id);
                id
            }
            None => self.ids.next_id(),
        };
        let event = Event::from_patch(id, patch);
        let handle = self.list.append(event.clone());
        self.index.set(id, handle);
        event
    }

    /// Put `event` where `old` is and drop `old`
    fn replace(&mut self, old: Handle, event: Event) -> Handle {
        let id = event.id;
        let handle = match self.list.insert_after(old, event) {
            Ok(handle) => handle,
            Err(event) => self.list.append(event),
        };
        self.list.remove(old);
        self.index.set(id, handle);
        handle
    }

    fn remove(&mut self, id: EventId) -> Option<Event> {
        let handle = self.index.delete(id)?;
        self.list.remove(handle)
    }

    fn find(&self, id: EventId) -> Option<&Event> {
        self.index.get(id).and_then(|handle| self.list.get(handle))
    }

    fn records(&self) -> Vec<WireEvent> {
        self.list.iter().map(WireEvent::from).collect()
    }
}

/// File and cache, shared with the tasks that run mutations
struct Shared {
    file: JsonFile,
    cache: Mutex<Option<EventCache>>,
}

/// The event store: single access point for reading and mutating events
pub struct AppEvents {
    shared: Arc<Shared>,
}

impl AppEvents {
    /// Create a store for the events file at `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            shared: Arc::new(Shared {
                file: JsonFile::new(path),
                cache: Mutex::new(None),
            }),
        }
    }

    /// Create a store for the events file named by `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.events_path())
    }

    /// Get the events file path
    pub fn file_path(&self) -> &Path {
        self.shared.file.path()
    }

    /// All events in stored order.
    ///
    /// Hydrates on first call; `force` discards the cache and re-reads the file.
    /// Callers present the list newest first (see [`crate::types::sort_newest_first`]).
    pub async fn get(&self, force: bool) -> StoreResult<Vec<Event>> {
        let mut guard = self.shared.cache.lock().await;
        if force {
            *guard = None;
        }
        let cache = self.shared.ready(&mut guard).await?;
        Ok(cache.list.to_vec())
    }

    /// Look up a single event
    pub async fn find(&self, id: EventId) -> StoreResult<Option<Event>> {
        let mut guard = self.shared.cache.lock().await;
        let cache = self.shared.ready(&mut guard).await?;
        Ok(cache.find(id).cloned())
    }

    /// Number of events
    pub async fn len(&self) -> StoreResult<usize> {
        let mut guard = self.shared.cache.lock().await;
        let cache = self.shared.ready(&mut guard).await?;
        Ok(cache.list.len())
    }

    /// Update the event with `id`, or create one.
    ///
    /// Returns `Ok(true)` when the change was persisted and `Ok(false)` when
    /// the save failed and memory was rolled back to the file's content.
    /// `Err` means the store could not be hydrated in the first place.
    pub async fn update_or_create(&self, id: Option<EventId>, patch: EventPatch) -> StoreResult<bool> {
        self.transaction(move |shared| async move {
            let mut guard = shared.cache.lock().await;
            let cache = shared.ready(&mut guard).await?;
            cache.upsert(id, patch);
            Ok(shared.commit(&mut guard).await.is_ok())
        })
        .await
    }

    /// Same transaction as [`update_or_create`](Self::update_or_create), but
    /// returns the saved record, or the save error after rolling back.
    pub async fn try_update_or_create(
        &self,
        id: Option<EventId>,
        patch: EventPatch,
    ) -> StoreResult<Event> {
        self.transaction(move |shared| async move {
            let mut guard = shared.cache.lock().await;
            let cache = shared.ready(&mut guard).await?;
            let event = cache.upsert(id, patch);
            shared.commit(&mut guard).await?;
            Ok(event)
        })
        .await
    }

    /// Delete an event. `Ok(None)` if there was no such id.
    pub async fn remove(&self, id: EventId) -> StoreResult<Option<Event>> {
        self.transaction(move |shared| async move {
            let mut guard = shared.cache.lock().await;
            let cache = shared.ready(&mut guard).await?;
            let removed = match cache.remove(id) {
                Some(event) => event,
                None => return Ok(None),
            };
            shared.commit(&mut guard).await?;
            Ok(Some(removed))
        })
        .await
    }

    /// Write the current list to disk
    pub async fn save(&self) -> StoreResult<()> {
        self.transaction(|shared| async move {
            let mut guard = shared.cache.lock().await;
            shared.ready(&mut guard).await?;
            shared.commit(&mut guard).await
        })
        .await
    }

    /// Run a mutation to completion on its own task
    async fn transaction<T, F, Fut>(&self, body: F) -> StoreResult<T>
    where
        F: FnOnce(Arc<Shared>) -> Fut,
        Fut: Future<Output = StoreResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let task = tokio::spawn(body(Arc::clone(&self.shared)));
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(StoreError::Interrupted(e)),
        }
    }
}

impl Shared {
    async fn ready<'a>(&self, slot: &'a mut Option<EventCache>) -> StoreResult<&'a mut EventCache> {
        let cache = match slot.take() {
            Some(cache) => cache,
            None => self.hydrate().await?,
        };
        Ok(slot.insert(cache))
    }

    async fn hydrate(&self) -> StoreResult<EventCache> {
        let records = self.file.load(decode_events).await?.unwrap_or_default();
        let cache = EventCache::from_records(records);
        info!(
            path = %self.file.path().display(),
            count = cache.list.len(),
            "Loaded events"
        );
        Ok(cache)
    }

    /// Persist the cache; on failure reload it from disk
    async fn commit(&self, slot: &mut Option<EventCache>) -> StoreResult<()> {
        let records = match slot.as_ref() {
            Some(cache) => cache.records(),
            None => return Ok(()),
        };

        match self.file.save(&records).await {
            Ok(()) => {
                debug!(count = records.len(), "Events saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Saving events failed, reloading from disk");
                self.rollback(slot).await;
                Err(e)
            }
        }
    }

    async fn rollback(&self, slot: &mut Option<EventCache>) {
        *slot = None;
        match self.hydrate().await {
            Ok(cache) => *slot = Some(cache),
            Err(e) => error!(error = %e, "Reload after failed save also failed, cache cleared"),
        }
    }
}
