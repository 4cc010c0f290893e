// CatStore - owns the loaded cats and publishes them as observable state
// The watch channel holds the list; a load task writes it once, then only &mut self methods do

use crate::detail::DetailOutcome;
use crate::error::{CatalogError, Result};
use crate::loader::CatSource;
use crate::model::Cat;
use crate::resource::Resource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What observers of the store see
pub type CatsState = Resource<Vec<Cat>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadStatus {
    Idle,
    InFlight,
    Loaded,
}

/// Handle to a background catalog load.
/// The load publishes its own outcome, dropping the handle only detaches it.
#[derive(Debug)]
pub struct LoadHandle {
    task: JoinHandle<()>,
}

impl LoadHandle {
    /// Cancel the load. The file read itself may still run to completion on
    /// the blocking pool, but its result is discarded and Error is published.
    pub fn abort(&self) {
        self.task.abort();
    }
}

// ============================================================================
// LOAD OUTCOME PUBLISHER
// ============================================================================

/// Owned by a load task; publishes exactly one outcome, even when the task is
/// cancelled or panics (the publisher is dropped with the task).
struct LoadPublisher {
    state: Arc<watch::Sender<CatsState>>,
    generation: Arc<AtomicU64>,
    id: u64,
    done: bool,
}

impl LoadPublisher {
    fn finish(&mut self, outcome: Result<Vec<Cat>>) {
        self.done = true;

        // a newer request owns the state now
        if self.generation.load(Ordering::SeqCst) != self.id {
            log::debug!("discarding outcome of stale load #{}", self.id);
            return;
        }

        match outcome {
            Ok(cats) => {
                log::info!("loaded {} cats", cats.len());
                self.state.send_replace(Resource::success(cats));
            }
            Err(e) => {
                log::error!("loading the cats failed: {}", e);
                self.state.send_replace(Resource::error(e.to_string()));
            }
        }
    }
}

impl Drop for LoadPublisher {
    fn drop(&mut self) {
        if !self.done {
            self.finish(Err(CatalogError::Task(
                "loading the cats was cancelled".to_string(),
            )));
        }
    }
}

// ============================================================================
// STORE
// ============================================================================

pub struct CatStore {
    source: Arc<dyn CatSource>,
    state: Arc<watch::Sender<CatsState>>,
    generation: Arc<AtomicU64>,
    requested: bool,
}

impl CatStore {
    /// Create a store that reads from `source`. Nothing is read until a load is requested.
    pub fn new<S: CatSource + 'static>(source: S) -> Self {
        let (state, _) = watch::channel(Resource::loading());
        CatStore {
            source: Arc::new(source),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            requested: false,
        }
    }

    /// Receiver notified on every state change, including republishes after adopting
    pub fn subscribe(&self) -> watch::Receiver<CatsState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CatsState {
        self.state.borrow().clone()
    }

    /// Loaded cats, empty unless the state is Success
    pub fn cats(&self) -> Vec<Cat> {
        self.state.borrow().data().cloned().unwrap_or_default()
    }

    fn status(&self) -> LoadStatus {
        match &*self.state.borrow() {
            Resource::Loading if self.requested => LoadStatus::InFlight,
            Resource::Success(_) => LoadStatus::Loaded,
            Resource::Loading | Resource::Error(_) => LoadStatus::Idle,
        }
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Start reading the catalog in the background.
    ///
    /// Returns `None` when a load is already in flight or the catalog has been
    /// loaded; after a failed load a fresh request is accepted. The outcome is
    /// published whether or not anyone keeps the handle.
    pub fn request_load(&mut self) -> Option<LoadHandle> {
        let status = self.status();
        if status != LoadStatus::Idle {
            log::debug!("load requested while {:?}, ignoring", status);
            return None;
        }

        log::info!("loading cats from {}", self.source.describe());
        self.requested = true;
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(Resource::loading());

        let mut publisher = LoadPublisher {
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            id,
            done: false,
        };
        let source = Arc::clone(&self.source);

        let task = tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || source.try_load())
                .await
                .map_err(|e| CatalogError::Task(e.to_string()))
                .and_then(|result| result);
            publisher.finish(outcome);
        });
        Some(LoadHandle { task })
    }

    /// Wait until a requested load has published its outcome
    pub async fn complete_load(&mut self, handle: LoadHandle) {
        if let Err(e) = handle.task.await {
            log::debug!("load task ended early: {}", e);
        }
    }

    /// Request a load and wait for it. No-op when nothing needs loading.
    pub async fn load(&mut self) {
        if let Some(handle) = self.request_load() {
            self.complete_load(handle).await;
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Flag the cat at `index` as adopted and republish the list
    pub fn mark_adopted(&mut self, index: usize) -> Result<()> {
        let mut result = Err(CatalogError::NotLoaded);

        self.state.send_if_modified(|state| {
            let Resource::Success(cats) = state else {
                return false;
            };

            let len = cats.len();
            match cats.get_mut(index) {
                Some(cat) => {
                    cat.adopted = true;
                    log::info!("{} (#{}) marked as adopted", cat.name, index);
                    result = Ok(());
                    true
                }
                None => {
                    result = Err(CatalogError::IndexOutOfRange { index, len });
                    false
                }
            }
        });

        result
    }

    /// Reconcile the list with what the detail view reported on exit.
    /// A detail view never un-adopts a cat.
    pub fn apply_detail_exit(&mut self, outcome: DetailOutcome) -> Result<()> {
        if outcome.adopted {
            self.mark_adopted(outcome.position)
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
