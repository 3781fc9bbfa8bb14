//! Sanitizer
//!
//! Two passes: merge the input onto trusted defaults, then re-assert the
//! protected subtrees. All protection policy lives here; the merge engine
//! stays generic.

use crate::merge::merge;
use crate::tokens::{BundleOverride, TokenBundle, TokenMap, TokenNode, TokenSchema};

/// Semantic groups that always equal the defaults
pub const LOCKED_SEMANTIC_GROUPS: [&str; 4] = ["surface", "divider", "focus", "density"];

/// Semantic group whose keys are locked except [`TEXT_OVERRIDABLE`]
pub const TEXT_GROUP: &str = "text";

/// Keys of `semantic.text` that overrides may change
pub const TEXT_OVERRIDABLE: [&str; 1] = ["accent"];

/// Keys of a protected component locked to defaults (when the default declares them)
pub const PROTECTED_COMPONENT_KEYS: [&str; 4] =
    ["background", "borderBottom", "borderRight", "borderLeft"];

/// Resolves untrusted overrides into safe bundles
#[derive(Clone, Copy)]
pub struct Sanitizer<'a> {
    schema: &'a TokenSchema,
}

impl Sanitizer<'static> {
    /// Sanitizer over the compiled-in schema
    pub fn builtin() -> Self {
        Self::new(TokenSchema::builtin())
    }
}

impl<'a> Sanitizer<'a> {
    pub fn new(schema: &'a TokenSchema) -> Self {
        Self { schema }
    }

    /// Merge `input` onto the defaults and re-assert protected fields
    pub fn sanitize(&self, input: Option<&BundleOverride>) -> TokenBundle {
        let defaults = self.schema.defaults();
        let mut bundle = merge(defaults, input);
        self.lock_semantic(&mut bundle.semantic, &defaults.semantic);
        self.lock_components(&mut bundle.component, &defaults.component);
        bundle
    }

    /// Sanitize an already resolved bundle (e.g. a live-edit result)
    pub fn sanitize_bundle(&self, bundle: &TokenBundle) -> TokenBundle {
        self.sanitize(Some(&bundle.to_override()))
    }

    fn lock_semantic(&self, semantic: &mut TokenMap, defaults: &TokenMap) {
        for group in LOCKED_SEMANTIC_GROUPS {
            if let Some(default) = defaults.get(group) {
                semantic.insert(group.to_string(), default.clone());
            }
        }

        let Some(TokenNode::Map(default_text)) = defaults.get(TEXT_GROUP) else {
            return;
        };
        let mut text = default_text.clone();
        if let Some(TokenNode::Map(merged)) = semantic.get(TEXT_GROUP) {
            for key in TEXT_OVERRIDABLE {
                if let (Some(value), Some(slot)) = (merged.get(key), text.get_mut(key)) {
                    *slot = value.clone();
                }
            }
        }
        semantic.insert(TEXT_GROUP.to_string(), TokenNode::Map(text));
    }

    fn lock_components(&self, components: &mut TokenMap, defaults: &TokenMap) {
        for id in self.schema.protected_components() {
            let Some(TokenNode::Map(default_styles)) = defaults.get(id) else {
                continue;
            };

            let entry = components
                .entry(id.to_string())
                .or_insert_with(|| TokenNode::Map(default_styles.clone()));
            if entry.as_map().is_none() {
                tracing::debug!("sanitize: restoring non-map component '{}'", id);
                *entry = TokenNode::Map(default_styles.clone());
            }

            if let Some(styles) = entry.as_map_mut() {
                for key in PROTECTED_COMPONENT_KEYS {
                    if let Some(default) = default_styles.get(key) {
                        styles.insert(key.to_string(), default.clone());
                    }
                }
            }
        }
    }
}

/// Sanitize with the compiled-in schema
pub fn sanitize(input: Option<&BundleOverride>) -> TokenBundle {
    Sanitizer::builtin().sanitize(input)
}

/// Sanitize an already resolved bundle with the compiled-in schema
pub fn sanitize_bundle(bundle: &TokenBundle) -> TokenBundle {
    Sanitizer::builtin().sanitize_bundle(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ComponentDef, Layer};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn over(value: serde_json::Value) -> BundleOverride {
        BundleOverride::from_json(value).unwrap()
    }

    fn defaults() -> &'static TokenBundle {
        TokenSchema::builtin().defaults()
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        assert_eq!(&sanitize(None), defaults());
    }

    #[test]
    fn test_locked_semantic_groups_reset() {
        let result = sanitize(Some(&over(json!({
            "semantic": {
                "surface": {"canvas": "#000"},
                "divider": {"color": "transparent"},
                "focus": {"ring": "none"},
                "density": {"gap": "0"},
            }
        }))));
        for group in LOCKED_SEMANTIC_GROUPS {
            assert_eq!(result.semantic[group], defaults().semantic[group], "{group}");
        }
    }

    #[test]
    fn test_text_accent_only() {
        let result = sanitize(Some(&over(json!({
            "semantic": {"text": {"accent": "#ff0000", "primary": "#ffffff", "muted": null}}
        }))));
        assert_eq!(
            result.lookup(Layer::Semantic, &["text", "accent"]),
            Some(&TokenNode::text("#ff0000"))
        );
        assert_eq!(
            result.lookup(Layer::Semantic, &["text", "primary"]),
            defaults().lookup(Layer::Semantic, &["text", "primary"])
        );
    }

    #[test]
    fn test_text_group_replaced_by_primitive() {
        let result = sanitize(Some(&over(json!({"semantic": {"text": "red"}}))));
        assert_eq!(result.semantic["text"], defaults().semantic["text"]);
    }

    #[test]
    fn test_unlocked_semantic_groups_accept_overrides() {
        let result = sanitize(Some(&over(json!({
            "semantic": {"accent": {"default": "#0ea5e9"}, "state": {"danger": "#b91c1c"}}
        }))));
        assert_eq!(
            result.lookup(Layer::Semantic, &["accent", "default"]),
            Some(&TokenNode::text("#0ea5e9"))
        );
        assert_eq!(
            result.lookup(Layer::Semantic, &["state", "danger"]),
            Some(&TokenNode::text("#b91c1c"))
        );
    }

    #[test]
    fn test_protected_component_keeps_other_keys() {
        let result = sanitize(Some(&over(json!({
            "component": {"layout.topbar": {
                "background": "#000",
                "borderBottom": "none",
                "height": "4rem",
            }}
        }))));
        let topbar = result.component("layout.topbar").unwrap();
        let default = defaults().component("layout.topbar").unwrap();
        assert_eq!(topbar["background"], default["background"]);
        assert_eq!(topbar["borderBottom"], default["borderBottom"]);
        assert_eq!(topbar["height"], TokenNode::text("4rem"));
    }

    #[test]
    fn test_protected_component_replaced_by_primitive() {
        let result = sanitize(Some(&over(json!({"component": {"button.primary": 42}}))));
        assert_eq!(
            result.component("button.primary"),
            defaults().component("button.primary")
        );
    }

    #[test]
    fn test_unprotected_component_background_may_change() {
        let result = sanitize(Some(&over(json!({
            "component": {"card.widget": {"background": "#fafafa"}}
        }))));
        assert_eq!(
            result.component("card.widget").unwrap()["background"],
            TokenNode::text("#fafafa")
        );
    }

    #[test]
    fn test_custom_schema_flags() {
        const DEFS: &[ComponentDef] = &[
            ComponentDef {
                id: "hero.banner",
                protected: true,
                styles: &[("background", "#fff"), ("color", "#000")],
            },
            ComponentDef {
                id: "hero.caption",
                protected: false,
                styles: &[("background", "#eee")],
            },
        ];
        let schema = TokenSchema::from_components(
            crate::tokens::default_core(),
            crate::tokens::default_semantic(),
            DEFS,
        );
        let sanitizer = Sanitizer::new(&schema);
        let result = sanitizer.sanitize(Some(&over(json!({
            "component": {
                "hero.banner": {"background": "#f00", "color": "#333"},
                "hero.caption": {"background": "#0f0"},
            }
        }))));
        assert_eq!(
            result.component("hero.banner").unwrap()["background"],
            TokenNode::text("#fff")
        );
        assert_eq!(
            result.component("hero.banner").unwrap()["color"],
            TokenNode::text("#333")
        );
        assert_eq!(
            result.component("hero.caption").unwrap()["background"],
            TokenNode::text("#0f0")
        );
    }

    #[test]
    fn test_idempotent() {
        let first = sanitize(Some(&over(json!({
            "core": {
                "color": {"brand": {"primary": "#e11d48"}},
                "typography": {"weight": {"bold": 800}}
            },
            "semantic": {"text": {"accent": "#e11d48"}, "surface": {"panel": "#000"}},
            "component": {"button.primary": {"background": "#000", "borderRadius": "0"}},
        }))));
        assert_eq!(sanitize_bundle(&first), first);
    }
}
