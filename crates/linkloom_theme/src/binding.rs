//! Store-to-root binding
//!
//! Keeps the `--tk-` properties on the document root in step with the token
//! store: every `set` re-projects the bundle and applies it as one batch.

use crate::error::Result;
use crate::projection::{project_bundle_with, TOKEN_PREFIX};
use crate::store::TokenStore;
use crate::tokens::TokenBundle;
use linkloom_core::{ListenerId, Namespace, ScopedProjector, SharedRoot};
use std::sync::Arc;

/// Live projection of a [`TokenStore`] onto the document root
pub struct StoreBinding {
    store: Arc<TokenStore>,
    projector: Arc<ScopedProjector>,
    listener: ListenerId,
}

impl StoreBinding {
    pub fn new(store: Arc<TokenStore>, root: &SharedRoot) -> Result<Self> {
        Self::with_prefix(store, root, TOKEN_PREFIX)
    }

    /// Bind and project the current bundle right away
    pub fn with_prefix(store: Arc<TokenStore>, root: &SharedRoot, prefix: &str) -> Result<Self> {
        let binding = Self::deferred(store, root, prefix)?;
        binding.refresh();
        Ok(binding)
    }

    /// Bind without projecting; the root stays empty until the next store
    /// `set` or an explicit [`refresh`](Self::refresh)
    pub fn deferred(store: Arc<TokenStore>, root: &SharedRoot, prefix: &str) -> Result<Self> {
        let projector = Arc::new(root.claim(Namespace::new(prefix))?);
        let target = projector.clone();
        let listener = store.subscribe(move |bundle| apply(&target, bundle));

        Ok(Self {
            store,
            projector,
            listener,
        })
    }

    /// Project the store's current bundle
    pub fn refresh(&self) {
        apply(&self.projector, &self.store.get());
    }
}

fn apply(projector: &ScopedProjector, bundle: &TokenBundle) {
    let projection = project_bundle_with(bundle, projector.namespace().prefix());
    let count = projector.replace_all(&projection.variables);
    tracing::trace!(
        "StoreBinding: applied {} properties ({} dropped)",
        count,
        projection.errors.len()
    );
}

impl Drop for StoreBinding {
    fn drop(&mut self) {
        self.store.unsubscribe(self.listener);
    }
}
