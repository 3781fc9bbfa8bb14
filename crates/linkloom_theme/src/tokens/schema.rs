//! Default token set and component protection schema
//!
//! Core values are literal primitives. Semantic and component values are
//! either literal CSS or dotted references (`"color.base.slate-50"`) that the
//! projection step resolves.

use super::bundle::TokenBundle;
use super::value::{TokenMap, TokenNode};
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Groups of the core layer
pub const CORE_GROUPS: [&str; 6] = [
    "color",
    "typography",
    "spacing",
    "shape",
    "motion",
    "elevation",
];

/// Groups of the semantic layer
pub const SEMANTIC_GROUPS: [&str; 7] = [
    "surface", "text", "accent", "state", "density", "focus", "divider",
];

/// A component entry in the default bundle
#[derive(Clone, Copy, Debug)]
pub struct ComponentDef {
    /// Dotted component id (`"layout.topbar"`)
    pub id: &'static str,
    /// Whether background and declared border sides are locked to defaults
    pub protected: bool,
    pub styles: &'static [(&'static str, &'static str)],
}

/// Built-in components. New entries are unprotected unless flagged.
pub const COMPONENTS: &[ComponentDef] = &[
    ComponentDef {
        id: "layout.topbar",
        protected: true,
        styles: &[
            ("background", "surface.panel"),
            ("borderBottom", "1px solid #e2e8f0"),
            ("color", "text.primary"),
            ("height", "3.5rem"),
            ("zIndex", "elevation.z-index.topbar"),
        ],
    },
    ComponentDef {
        id: "layout.sidebar",
        protected: true,
        styles: &[
            ("background", "surface.panel"),
            ("borderRight", "1px solid #e2e8f0"),
            ("color", "text.secondary"),
            ("width", "16rem"),
            ("zIndex", "elevation.z-index.sidebar"),
        ],
    },
    ComponentDef {
        id: "layout.inspector",
        protected: true,
        styles: &[
            ("background", "surface.panel"),
            ("borderLeft", "1px solid #e2e8f0"),
            ("color", "text.primary"),
            ("width", "20rem"),
        ],
    },
    ComponentDef {
        id: "layout.canvas",
        protected: true,
        styles: &[
            ("background", "surface.canvas"),
            ("padding", "spacing.8"),
        ],
    },
    ComponentDef {
        id: "button.primary",
        protected: true,
        styles: &[
            ("background", "accent.default"),
            ("color", "accent.contrast"),
            ("borderRadius", "shape.radius.md"),
            ("paddingX", "spacing.4"),
            ("paddingY", "spacing.2"),
            ("fontWeight", "typography.weight.semibold"),
            ("transitionDuration", "motion.duration.fast"),
        ],
    },
    ComponentDef {
        id: "button.secondary",
        protected: false,
        styles: &[
            ("background", "surface.raised"),
            ("color", "text.primary"),
            ("border", "1px solid #cbd5e1"),
            ("borderRadius", "shape.radius.md"),
        ],
    },
    ComponentDef {
        id: "input.text",
        protected: true,
        styles: &[
            ("background", "color.base.white"),
            ("borderBottom", "1px solid #cbd5e1"),
            ("color", "text.primary"),
            ("borderRadius", "shape.radius.sm"),
            ("height", "density.control-height"),
        ],
    },
    ComponentDef {
        id: "modal.dialog",
        protected: true,
        styles: &[
            ("background", "surface.raised"),
            ("borderRadius", "shape.radius.lg"),
            ("boxShadow", "elevation.shadow.lg"),
            ("zIndex", "elevation.z-index.modal"),
        ],
    },
    ComponentDef {
        id: "card.widget",
        protected: false,
        styles: &[
            ("background", "surface.raised"),
            ("borderRadius", "shape.radius.lg"),
            ("boxShadow", "elevation.shadow.sm"),
            ("padding", "spacing.4"),
        ],
    },
    ComponentDef {
        id: "toast.default",
        protected: false,
        styles: &[
            ("background", "color.base.slate-900"),
            ("color", "text.inverse"),
            ("zIndex", "elevation.z-index.toast"),
        ],
    },
];

/// Default bundle plus the set of protected components
#[derive(Clone, Debug)]
pub struct TokenSchema {
    defaults: TokenBundle,
    protected: FxHashSet<String>,
}

static BUILTIN_SCHEMA: OnceLock<TokenSchema> = OnceLock::new();

impl TokenSchema {
    pub fn new(defaults: TokenBundle, protected: impl IntoIterator<Item = String>) -> Self {
        Self {
            defaults,
            protected: protected.into_iter().collect(),
        }
    }

    /// Build a schema from component definitions and the given core/semantic layers
    pub fn from_components(
        core: TokenMap,
        semantic: TokenMap,
        components: &[ComponentDef],
    ) -> Self {
        let component = components
            .iter()
            .map(|def| {
                let styles = def
                    .styles
                    .iter()
                    .map(|(key, value)| (key.to_string(), TokenNode::text(*value)))
                    .collect();
                (def.id.to_string(), TokenNode::Map(styles))
            })
            .collect();

        let protected = components
            .iter()
            .filter(|def| def.protected)
            .map(|def| def.id.to_string());

        Self::new(
            TokenBundle {
                core,
                semantic,
                component,
            },
            protected,
        )
    }

    /// The compiled-in schema
    pub fn builtin() -> &'static TokenSchema {
        BUILTIN_SCHEMA
            .get_or_init(|| Self::from_components(default_core(), default_semantic(), COMPONENTS))
    }

    pub fn defaults(&self) -> &TokenBundle {
        &self.defaults
    }

    pub fn is_protected(&self, component_id: &str) -> bool {
        self.protected.contains(component_id)
    }

    /// Protected component ids, in default-bundle order
    pub fn protected_components(&self) -> impl Iterator<Item = &str> + '_ {
        self.defaults
            .component
            .keys()
            .map(String::as_str)
            .filter(|id| self.protected.contains(*id))
    }
}

fn text(value: &str) -> TokenNode {
    TokenNode::text(value)
}

fn num(value: f64) -> TokenNode {
    TokenNode::number(value)
}

fn list(values: &[&str]) -> TokenNode {
    TokenNode::List(values.iter().map(|v| text(v)).collect())
}

fn group(entries: Vec<(&str, TokenNode)>) -> TokenNode {
    TokenNode::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn texts(entries: &[(&str, &str)]) -> TokenNode {
    group(entries.iter().map(|(k, v)| (*k, text(v))).collect())
}

fn layer(entries: Vec<(&str, TokenNode)>) -> TokenMap {
    match group(entries) {
        TokenNode::Map(map) => map,
        _ => TokenMap::new(),
    }
}

/// Default core primitives
pub fn default_core() -> TokenMap {
    layer(vec![
        (
            "color",
            group(vec![
                (
                    "base",
                    texts(&[
                        ("white", "#ffffff"),
                        ("black", "#000000"),
                        ("slate-50", "#f8fafc"),
                        ("slate-100", "#f1f5f9"),
                        ("slate-200", "#e2e8f0"),
                        ("slate-300", "#cbd5e1"),
                        ("slate-400", "#94a3b8"),
                        ("slate-600", "#475569"),
                        ("slate-800", "#1e293b"),
                        ("slate-900", "#0f172a"),
                    ]),
                ),
                (
                    "brand",
                    texts(&[
                        ("primary", "#4f46e5"),
                        ("primary-hover", "#4338ca"),
                        ("primary-subtle", "#eef2ff"),
                    ]),
                ),
                (
                    "state",
                    texts(&[
                        ("success", "#16a34a"),
                        ("warning", "#d97706"),
                        ("danger", "#dc2626"),
                        ("info", "#0ea5e9"),
                    ]),
                ),
            ]),
        ),
        (
            "typography",
            group(vec![
                (
                    "family",
                    group(vec![
                        ("sans", list(&["Inter", "system-ui", "sans-serif"])),
                        ("mono", list(&["JetBrains Mono", "ui-monospace", "monospace"])),
                    ]),
                ),
                (
                    "scale",
                    texts(&[
                        ("xs", "0.75rem"),
                        ("sm", "0.875rem"),
                        ("md", "1rem"),
                        ("lg", "1.125rem"),
                        ("xl", "1.25rem"),
                        ("2xl", "1.5rem"),
                    ]),
                ),
                (
                    "weight",
                    group(vec![
                        ("regular", num(400.0)),
                        ("medium", num(500.0)),
                        ("semibold", num(600.0)),
                        ("bold", num(700.0)),
                    ]),
                ),
                (
                    "line-height",
                    group(vec![
                        ("tight", num(1.2)),
                        ("normal", num(1.5)),
                        ("relaxed", num(1.75)),
                    ]),
                ),
                (
                    "tracking",
                    texts(&[("tight", "-0.01em"), ("normal", "0"), ("wide", "0.02em")]),
                ),
            ]),
        ),
        (
            "spacing",
            texts(&[
                ("0", "0"),
                ("1", "0.25rem"),
                ("2", "0.5rem"),
                ("3", "0.75rem"),
                ("4", "1rem"),
                ("6", "1.5rem"),
                ("8", "2rem"),
            ]),
        ),
        (
            "shape",
            group(vec![
                (
                    "radius",
                    texts(&[
                        ("sm", "4px"),
                        ("md", "8px"),
                        ("lg", "12px"),
                        ("full", "9999px"),
                    ]),
                ),
                ("border-width", texts(&[("thin", "1px"), ("thick", "2px")])),
            ]),
        ),
        (
            "motion",
            group(vec![
                (
                    "duration",
                    texts(&[("fast", "120ms"), ("normal", "200ms"), ("slow", "320ms")]),
                ),
                (
                    "easing",
                    texts(&[
                        ("standard", "cubic-bezier(0.2, 0, 0, 1)"),
                        ("enter", "cubic-bezier(0, 0, 0.2, 1)"),
                        ("exit", "cubic-bezier(0.4, 0, 1, 1)"),
                    ]),
                ),
            ]),
        ),
        (
            "elevation",
            group(vec![
                (
                    "shadow",
                    texts(&[
                        ("sm", "0 1px 2px rgba(15, 23, 42, 0.06)"),
                        ("md", "0 4px 12px rgba(15, 23, 42, 0.08)"),
                        ("lg", "0 12px 32px rgba(15, 23, 42, 0.16)"),
                    ]),
                ),
                (
                    "z-index",
                    group(vec![
                        ("sidebar", num(90.0)),
                        ("topbar", num(100.0)),
                        ("modal", num(1000.0)),
                        ("toast", num(1100.0)),
                    ]),
                ),
            ]),
        ),
    ])
}

/// Default semantic roles
pub fn default_semantic() -> TokenMap {
    layer(vec![
        (
            "surface",
            texts(&[
                ("canvas", "color.base.slate-50"),
                ("panel", "color.base.white"),
                ("raised", "color.base.white"),
                ("sunken", "color.base.slate-100"),
                ("overlay", "rgba(15, 23, 42, 0.6)"),
            ]),
        ),
        (
            "text",
            texts(&[
                ("primary", "color.base.slate-900"),
                ("secondary", "color.base.slate-600"),
                ("muted", "color.base.slate-400"),
                ("inverse", "color.base.white"),
                ("accent", "color.brand.primary"),
            ]),
        ),
        (
            "accent",
            texts(&[
                ("default", "color.brand.primary"),
                ("hover", "color.brand.primary-hover"),
                ("subtle", "color.brand.primary-subtle"),
                ("contrast", "color.base.white"),
            ]),
        ),
        (
            "state",
            texts(&[
                ("success", "color.state.success"),
                ("warning", "color.state.warning"),
                ("danger", "color.state.danger"),
                ("info", "color.state.info"),
            ]),
        ),
        (
            "density",
            texts(&[
                ("control-height", "2.25rem"),
                ("gap", "spacing.2"),
                ("inset", "spacing.4"),
            ]),
        ),
        (
            "focus",
            texts(&[
                ("ring", "color.brand.primary"),
                ("ring-width", "shape.border-width.thick"),
                ("ring-offset", "2px"),
            ]),
        ),
        (
            "divider",
            texts(&[
                ("color", "color.base.slate-200"),
                ("width", "shape.border-width.thin"),
                ("style", "solid"),
            ]),
        ),
    ])
}
