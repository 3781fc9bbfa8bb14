//! Bundle synchronizer
//!
//! Fetches the page's override bundle once per mount, sanitizes it and pushes
//! it into the [`TokenStore`]. Observable states:
//!
//! ```text
//! Loading --fetch ok--> Success   (store.set called exactly once)
//!    |
//!    +---fetch err----> Error     (store untouched)
//! ```
//!
//! A result that arrives after [`BundleSynchronizer::unmount`] or after the
//! store was reset is discarded.

use crate::error::SyncError;
use crate::sanitize::sanitize;
use crate::store::TokenStore;
use crate::tokens::BundleOverride;
use linkloom_core::{ListenerId, Listeners};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// External source of the override bundle (usually an HTTP `GET`)
///
/// Returns the decoded JSON body, or `None` when the page has no stored
/// configuration. Retry policy, if any, belongs to the source.
pub trait BundleSource: Send + Sync {
    fn fetch(
        &self,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, SyncError>> + Send;
}

/// Source that always yields the same payload
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    payload: Option<serde_json::Value>,
}

impl StaticSource {
    pub fn new(payload: Option<serde_json::Value>) -> Self {
        Self { payload }
    }
}

impl BundleSource for StaticSource {
    fn fetch(
        &self,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, SyncError>> + Send {
        let payload = self.payload.clone();
        async move { Ok(payload) }
    }
}

/// Observable synchronizer state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// Fetch pending; dependent UI shows a neutral placeholder
    Loading,
    /// Fetch failed; the store keeps its last good bundle
    Error { message: String },
    /// Fetched bundle applied to the store
    Success,
}

/// What happened to a completed fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The sanitized bundle was written to the store
    Applied,
    /// The host tore down (or reset the store) before completion
    Discarded,
}

/// Drives one fetch per mount lifecycle
pub struct BundleSynchronizer<S> {
    source: S,
    store: Arc<TokenStore>,
    state: RwLock<SyncState>,
    started: AtomicBool,
    mounted: AtomicBool,
    listeners: Listeners<SyncState>,
}

impl<S> BundleSynchronizer<S> {
    pub fn new(source: S, store: Arc<TokenStore>) -> Self {
        Self {
            source,
            store,
            state: RwLock::new(SyncState::Loading),
            started: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
            listeners: Listeners::new(),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state.read().unwrap().clone()
    }

    /// Whether dependent UI should render a placeholder instead of tokens
    pub fn is_placeholder(&self) -> bool {
        matches!(*self.state.read().unwrap(), SyncState::Loading)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Mark the host as torn down; a pending result will be dropped
    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            tracing::debug!("BundleSynchronizer::unmount");
        }
    }

    /// Register a callback run on every state transition
    pub fn subscribe<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&SyncState) + Send + Sync + 'static,
    {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<S: BundleSource> BundleSynchronizer<S> {
    /// Fetch, sanitize and apply. Only the first call per mount fetches.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SyncError::AlreadyStarted);
        }

        let epoch = self.store.epoch();
        tracing::debug!("BundleSynchronizer::run - fetching override bundle");
        let outcome = self
            .source
            .fetch()
            .await
            .and_then(BundleOverride::from_payload);

        if !self.is_mounted() || self.store.epoch() != epoch {
            tracing::debug!("BundleSynchronizer::run - stale result, discarding");
            return Ok(SyncOutcome::Discarded);
        }

        match outcome {
            Ok(over) => {
                let bundle = sanitize(over.as_ref());
                self.store.set(bundle);
                self.transition(SyncState::Success);
                Ok(SyncOutcome::Applied)
            }
            Err(err) => {
                tracing::warn!("BundleSynchronizer::run - {}", err);
                self.transition(SyncState::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn transition(&self, next: SyncState) {
        {
            let mut state = self.state.write().unwrap();
            tracing::debug!("BundleSynchronizer: {:?} -> {:?}", *state, next);
            *state = next.clone();
        }
        self.listeners.notify(&next);
    }
}

impl<S: BundleSource + 'static> BundleSynchronizer<S> {
    /// Run the fetch as a task on the current tokio runtime
    pub fn spawn(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<SyncOutcome, SyncError>> {
        let this = self.clone();
        tokio::spawn(async move { this.run().await })
    }
}
