//! Editor session
//!
//! Everything one mounted admin editor needs, wired together: the page token
//! store bound to the root under `--tk-`, the admin chrome under `--chrome-`,
//! and a synchronizer that fetches the page's stored bundle once.
//!
//! Page tokens are not projected while the fetch is pending, so the root never
//! shows defaults that are about to be replaced. A successful fetch projects
//! the fetched bundle; a failed or discarded one projects the store's current
//! bundle.
//!
//! Dropping the session (or calling [`EditorSession::unmount`]) releases both
//! namespaces and makes a still-pending fetch discard its result.

use crate::binding::StoreBinding;
use crate::chrome::AdminChromeTheme;
use crate::config::{AdminConfig, CssConfig};
use crate::error::{Result, SyncError};
use crate::preview::LiveEditor;
use crate::store::TokenStore;
use crate::sync::{BundleSource, BundleSynchronizer, SyncOutcome, SyncState};
use linkloom_core::{FileStorage, KeyValueStore, ListenerId, MemoryStorage, SharedRoot};
use std::sync::{Arc, Weak};

/// One mount lifecycle of the admin editor
pub struct EditorSession<S> {
    store: Arc<TokenStore>,
    chrome: AdminChromeTheme,
    synchronizer: Arc<BundleSynchronizer<S>>,
    binding: Arc<StoreBinding>,
    on_error: ListenerId,
}

impl<S: BundleSource> EditorSession<S> {
    /// Mount with the default `--tk-` / `--chrome-` namespaces
    pub fn mount(
        source: S,
        store: Arc<TokenStore>,
        root: &SharedRoot,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        Self::mount_with(source, store, root, storage, &CssConfig::default())
    }

    pub fn mount_with(
        source: S,
        store: Arc<TokenStore>,
        root: &SharedRoot,
        storage: Arc<dyn KeyValueStore>,
        css: &CssConfig,
    ) -> Result<Self> {
        let binding = Arc::new(StoreBinding::deferred(
            store.clone(),
            root,
            &css.token_prefix,
        )?);
        let chrome = AdminChromeTheme::with_prefix(storage, root, &css.chrome_prefix)?;
        let synchronizer = Arc::new(BundleSynchronizer::new(source, store.clone()));

        // success projects through the store; a failure leaves the store as is
        let fallback = Arc::downgrade(&binding);
        let on_error = synchronizer.subscribe(move |state| {
            if let SyncState::Error { .. } = state {
                project_fallback(&fallback);
            }
        });
        tracing::debug!("EditorSession::mount");

        Ok(Self {
            store,
            chrome,
            synchronizer,
            binding,
            on_error,
        })
    }

    /// Fetch the page's stored bundle and apply it
    pub async fn load(&self) -> std::result::Result<SyncOutcome, SyncError> {
        let outcome = self.synchronizer.run().await;
        settle(&outcome, self.synchronizer.as_ref(), &Arc::downgrade(&self.binding));
        outcome
    }

    pub fn state(&self) -> SyncState {
        self.synchronizer.state()
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    pub fn chrome(&self) -> &AdminChromeTheme {
        &self.chrome
    }

    pub fn synchronizer(&self) -> &Arc<BundleSynchronizer<S>> {
        &self.synchronizer
    }

    /// Start a live-edit preview against this session's store
    pub fn editor(&self) -> LiveEditor {
        LiveEditor::begin(self.store.clone())
    }

    /// Tear down; equivalent to dropping the session
    pub fn unmount(self) {}
}

impl<S: BundleSource + 'static> EditorSession<S> {
    /// Fetch in the background on the current tokio runtime
    pub fn spawn_load(
        &self,
    ) -> tokio::task::JoinHandle<std::result::Result<SyncOutcome, SyncError>> {
        let synchronizer = self.synchronizer.clone();
        let binding = Arc::downgrade(&self.binding);
        tokio::spawn(async move {
            let outcome = synchronizer.run().await;
            settle(&outcome, synchronizer.as_ref(), &binding);
            outcome
        })
    }
}

impl<S> Drop for EditorSession<S> {
    fn drop(&mut self) {
        self.synchronizer.unmount();
        self.synchronizer.unsubscribe(self.on_error);
        tracing::debug!("EditorSession::unmount");
    }
}

/// A result dropped while still mounted (store reset) falls back to the store
fn settle<S>(
    outcome: &std::result::Result<SyncOutcome, SyncError>,
    synchronizer: &BundleSynchronizer<S>,
    binding: &Weak<StoreBinding>,
) {
    if let Ok(SyncOutcome::Discarded) = outcome {
        if synchronizer.is_mounted() {
            project_fallback(binding);
        }
    }
}

fn project_fallback(binding: &Weak<StoreBinding>) {
    if let Some(binding) = binding.upgrade() {
        tracing::debug!("EditorSession: projecting current bundle");
        binding.refresh();
    }
}

/// Local storage for the admin chrome mode: file-backed when configured
pub fn open_storage(config: &AdminConfig) -> Arc<dyn KeyValueStore> {
    match &config.storage_path {
        Some(path) => Arc::new(FileStorage::new(path.clone())),
        None => Arc::new(MemoryStorage::new()),
    }
}
