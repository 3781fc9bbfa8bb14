//! Three-layer token bundles and partial overrides

use super::value::{map_to_json, TokenMap, TokenNode};
use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three layers of a bundle
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Layer {
    /// Primitive scales (palette, typography, spacing, shape, motion, elevation)
    Core,
    /// Named roles referencing core primitives
    Semantic,
    /// Per-component style maps
    Component,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Core, Layer::Semantic, Layer::Component];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Core => "core",
            Layer::Semantic => "semantic",
            Layer::Component => "component",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A complete, resolved design-token configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub core: TokenMap,
    pub semantic: TokenMap,
    pub component: TokenMap,
}

impl TokenBundle {
    pub fn layer(&self, layer: Layer) -> &TokenMap {
        match layer {
            Layer::Core => &self.core,
            Layer::Semantic => &self.semantic,
            Layer::Component => &self.component,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut TokenMap {
        match layer {
            Layer::Core => &mut self.core,
            Layer::Semantic => &mut self.semantic,
            Layer::Component => &mut self.component,
        }
    }

    /// Look up a node by layer and path (`["color", "base", "white"]`)
    pub fn lookup<S: AsRef<str>>(&self, layer: Layer, path: &[S]) -> Option<&TokenNode> {
        let (first, rest) = path.split_first()?;
        self.layer(layer).get(first.as_ref())?.walk(rest)
    }

    /// Style map of a component, if it is a map
    pub fn component(&self, id: &str) -> Option<&TokenMap> {
        self.component.get(id).and_then(TokenNode::as_map)
    }

    /// Express this bundle as an override carrying every value
    pub fn to_override(&self) -> BundleOverride {
        BundleOverride {
            core: Some(map_to_json(&self.core)),
            semantic: Some(map_to_json(&self.semantic)),
            component: Some(map_to_json(&self.component)),
        }
    }
}

impl Default for TokenBundle {
    fn default() -> Self {
        super::TokenSchema::builtin().defaults().clone()
    }
}

/// A partial bundle supplied from outside (server storage, live edits)
///
/// Layers are kept as raw JSON so that `null` at any depth survives decoding
/// and can be told apart from a real value during merge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<serde_json::Value>,
}

impl BundleOverride {
    pub fn layer(&self, layer: Layer) -> Option<&serde_json::Value> {
        match layer {
            Layer::Core => self.core.as_ref(),
            Layer::Semantic => self.semantic.as_ref(),
            Layer::Component => self.component.as_ref(),
        }
    }

    /// Decode a fetched payload
    ///
    /// `null` and absent payloads decode to `None`. Any JSON object is
    /// accepted; unknown top-level layers are dropped. Anything else is
    /// a [`SyncError::MalformedPayload`].
    pub fn from_payload(payload: Option<serde_json::Value>) -> Result<Option<Self>, SyncError> {
        match payload {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(mut entries)) => {
                let mut over = BundleOverride::default();
                for layer in Layer::ALL {
                    let value = entries.remove(layer.name()).filter(|v| !v.is_null());
                    match layer {
                        Layer::Core => over.core = value,
                        Layer::Semantic => over.semantic = value,
                        Layer::Component => over.component = value,
                    }
                }
                for unknown in entries.keys() {
                    tracing::debug!("BundleOverride: dropping unknown layer '{}'", unknown);
                }
                Ok(Some(over))
            }
            Some(other) => Err(SyncError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Decode a JSON object, treating any non-object as malformed
    pub fn from_json(value: serde_json::Value) -> Result<Self, SyncError> {
        Ok(Self::from_payload(Some(value))?.unwrap_or_default())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
