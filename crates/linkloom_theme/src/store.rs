//! Token store
//!
//! Holds the current resolved bundle. One logical writer (the synchronizer,
//! or a live-edit session), many readers. Readers get a cheap `Arc` snapshot;
//! a write swaps the snapshot and notifies subscribers.
//!
//! The store never re-sanitizes: callers of [`TokenStore::set`] must pass a
//! bundle produced by the sanitizer.

use crate::tokens::TokenBundle;
use linkloom_core::{ListenerId, Listeners};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

/// Global token store instance
static TOKEN_STORE: OnceLock<Arc<TokenStore>> = OnceLock::new();

/// Observable holder of the current token bundle
pub struct TokenStore {
    current: RwLock<Arc<TokenBundle>>,
    /// Incremented on every write
    revision: AtomicU64,
    /// Incremented on reset; in-flight fetches started under an older epoch are discarded
    epoch: AtomicU64,
    listeners: Listeners<Arc<TokenBundle>>,
}

impl TokenStore {
    /// Create a store seeded with the compiled-in defaults
    pub fn new() -> Self {
        Self::with_bundle(TokenBundle::default())
    }

    pub fn with_bundle(bundle: TokenBundle) -> Self {
        Self {
            current: RwLock::new(Arc::new(bundle)),
            revision: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
            listeners: Listeners::new(),
        }
    }

    /// Initialize the global store (first call wins)
    pub fn init() -> &'static Arc<TokenStore> {
        TOKEN_STORE.get_or_init(|| Arc::new(TokenStore::new()))
    }

    /// Get the global store instance
    pub fn global() -> &'static Arc<TokenStore> {
        TOKEN_STORE
            .get()
            .expect("TokenStore not initialized. Call TokenStore::init() at app startup.")
    }

    /// Try to get the global store (returns None if not initialized)
    pub fn try_global() -> Option<&'static Arc<TokenStore>> {
        TOKEN_STORE.get()
    }

    /// Current bundle
    pub fn get(&self) -> Arc<TokenBundle> {
        self.current.read().unwrap().clone()
    }

    /// Replace the current bundle and notify subscribers
    pub fn set(&self, bundle: TokenBundle) {
        let next = Arc::new(bundle);
        {
            let mut current = self.current.write().unwrap();
            *current = next.clone();
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        tracing::debug!(
            "TokenStore::set - revision {}",
            self.revision.load(Ordering::SeqCst)
        );
        self.listeners.notify(&next);
    }

    /// Drop back to the defaults and invalidate in-flight fetches
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.set(TokenBundle::default());
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Register a callback run after every `set`
    pub fn subscribe<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&Arc<TokenBundle>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
