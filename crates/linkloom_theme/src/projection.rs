//! CSS projection
//!
//! Turns a resolved bundle into a flat map of custom-property names to literal
//! values. Property names are `{prefix}{layer}-{path}` with dots turned into
//! dashes and camelCase keys turned into kebab-case:
//!
//! - `core.color.base.white` -> `--tk-core-color-base-white`
//! - `component["layout.topbar"].borderBottom` -> `--tk-component-layout-topbar-border-bottom`
//!
//! A reference that does not resolve drops only its own property.

use crate::error::ProjectionError;
use crate::reference::{literal, Resolver};
use crate::tokens::{Layer, TokenBundle, TokenMap, TokenNode};
use indexmap::IndexMap;

/// Namespace of the page token properties
pub const TOKEN_PREFIX: &str = "--tk-";

/// Result of projecting a bundle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    pub variables: IndexMap<String, String>,
    /// Keys dropped because their reference did not resolve
    pub errors: Vec<ProjectionError>,
}

impl Projection {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Project with the default token prefix
pub fn project_bundle(bundle: &TokenBundle) -> Projection {
    project_bundle_with(bundle, TOKEN_PREFIX)
}

/// Project under a custom prefix (`"--tk-"`)
pub fn project_bundle_with(bundle: &TokenBundle, prefix: &str) -> Projection {
    let mut projector = BundleProjector {
        resolver: Resolver::new(bundle),
        out: Projection::default(),
    };

    for layer in Layer::ALL {
        let mut name = String::with_capacity(48);
        name.push_str(prefix);
        name.push_str(layer.name());
        projector.walk(layer, bundle.layer(layer), &name);
    }

    for error in &projector.out.errors {
        tracing::warn!("projection: {}", error);
    }
    projector.out
}

struct BundleProjector<'b> {
    resolver: Resolver<'b>,
    out: Projection,
}

impl BundleProjector<'_> {
    fn walk(&mut self, layer: Layer, map: &TokenMap, name: &str) {
        for (key, node) in map {
            let mut property = String::with_capacity(name.len() + key.len() + 1);
            property.push_str(name);
            property.push('-');
            push_kebab(&mut property, key);

            match node {
                TokenNode::Map(inner) => self.walk(layer, inner, &property),
                leaf => self.emit(layer, property, leaf),
            }
        }
    }

    fn emit(&mut self, layer: Layer, property: String, leaf: &TokenNode) {
        let value = match layer {
            Layer::Core => literal(leaf),
            Layer::Semantic | Layer::Component => match self.resolver.resolve(leaf) {
                Ok(value) => value,
                Err((reference, reason)) => {
                    self.out.errors.push(ProjectionError::UnresolvedReference {
                        property,
                        reference,
                        reason,
                    });
                    return;
                }
            },
        };

        if self.out.variables.contains_key(&property) {
            tracing::warn!("projection: duplicate property '{}', keeping first", property);
            return;
        }
        self.out.variables.insert(property, value);
    }
}

/// Append `key` in kebab-case: `borderBottom` -> `border-bottom`
fn push_kebab(out: &mut String, key: &str) {
    let mut prev_lower = false;
    for c in key.chars() {
        match c {
            '.' | '_' | ' ' => {
                out.push('-');
                prev_lower = false;
            }
            c if c.is_ascii_uppercase() => {
                if prev_lower {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
                prev_lower = false;
            }
            c => {
                out.push(c);
                prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            }
        }
    }
}

/// Kebab-case form of a token key
pub fn kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    push_kebab(&mut out, key);
    out
}
