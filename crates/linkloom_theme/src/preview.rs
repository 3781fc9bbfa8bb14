//! Live-edit preview
//!
//! While the user edits the page theme, partial edits are merged onto the
//! current bundle, sanitized, and pushed to the store so the preview updates
//! immediately. The bundle at session start can be restored.

use crate::merge::merge;
use crate::sanitize::Sanitizer;
use crate::store::TokenStore;
use crate::tokens::{BundleOverride, TokenBundle};
use std::sync::Arc;

/// One editing session against a token store
pub struct LiveEditor {
    store: Arc<TokenStore>,
    baseline: Arc<TokenBundle>,
}

impl LiveEditor {
    /// Start editing; the current bundle becomes the revert point
    pub fn begin(store: Arc<TokenStore>) -> Self {
        let baseline = store.get();
        Self { store, baseline }
    }

    /// Apply a partial edit on top of the current bundle
    pub fn apply(&self, edit: &BundleOverride) -> Arc<TokenBundle> {
        let current = self.store.get();
        let merged = merge(&current, Some(edit));
        let sanitized = Sanitizer::builtin().sanitize_bundle(&merged);
        self.store.set(sanitized);
        self.store.get()
    }

    /// Restore the bundle captured at `begin` (or the last `commit`)
    pub fn revert(&self) {
        tracing::debug!("LiveEditor::revert");
        self.store.set(TokenBundle::clone(&self.baseline));
    }

    /// Make the current bundle the new revert point
    pub fn commit(&mut self) -> Arc<TokenBundle> {
        self.baseline = self.store.get();
        self.baseline.clone()
    }

    /// Whether the store differs from the revert point
    pub fn is_dirty(&self) -> bool {
        *self.store.get() != *self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Layer, TokenNode, TokenSchema};
    use serde_json::json;

    fn edit(value: serde_json::Value) -> BundleOverride {
        BundleOverride::from_json(value).unwrap()
    }

    #[test]
    fn test_edits_accumulate() {
        let store = Arc::new(TokenStore::new());
        let editor = LiveEditor::begin(store.clone());

        editor.apply(&edit(json!({"semantic": {"text": {"accent": "#10b981"}}})));
        let bundle = editor.apply(&edit(json!({"core": {"shape": {"radius": {"md": "6px"}}}})));

        assert_eq!(
            bundle.lookup(Layer::Semantic, &["text", "accent"]),
            Some(&TokenNode::text("#10b981"))
        );
        assert_eq!(
            bundle.lookup(Layer::Core, &["shape", "radius", "md"]),
            Some(&TokenNode::text("6px"))
        );
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_edits_cannot_touch_protected_fields() {
        let store = Arc::new(TokenStore::new());
        let editor = LiveEditor::begin(store);
        let bundle = editor.apply(&edit(json!({
            "component": {"layout.sidebar": {"background": "transparent", "borderRight": "0"}}
        })));
        assert_eq!(
            bundle.component("layout.sidebar"),
            TokenSchema::builtin().defaults().component("layout.sidebar")
        );
    }

    #[test]
    fn test_revert_and_commit() {
        let store = Arc::new(TokenStore::new());
        let mut editor = LiveEditor::begin(store.clone());

        editor.apply(&edit(json!({"core": {"spacing": {"4": "1.25rem"}}})));
        editor.revert();
        assert_eq!(*store.get(), TokenBundle::default());
        assert!(!editor.is_dirty());

        editor.apply(&edit(json!({"core": {"spacing": {"4": "1.25rem"}}})));
        let committed = editor.commit();
        editor.revert();
        assert_eq!(store.get(), committed);
    }
}
