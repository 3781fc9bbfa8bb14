//! Bundle merge engine
//!
//! Deep-merges a partial override onto a base bundle. The schema is closed:
//! only keys the base defines can be changed. Maps merge recursively, lists
//! and primitives are replaced wholesale, `null` keeps the base value.

use crate::tokens::{BundleOverride, TokenBundle, TokenMap, TokenNode};

/// Merge `over` onto `base`
///
/// Always returns a new bundle, even when there is nothing to merge.
pub fn merge(base: &TokenBundle, over: Option<&BundleOverride>) -> TokenBundle {
    let Some(over) = over else {
        return base.clone();
    };

    TokenBundle {
        core: merge_layer(&base.core, over.core.as_ref()),
        semantic: merge_layer(&base.semantic, over.semantic.as_ref()),
        component: merge_layer(&base.component, over.component.as_ref()),
    }
}

fn merge_layer(base: &TokenMap, over: Option<&serde_json::Value>) -> TokenMap {
    match over {
        Some(serde_json::Value::Object(entries)) => merge_map(base, entries),
        Some(serde_json::Value::Null) | None => base.clone(),
        Some(_) => {
            tracing::debug!("merge: ignoring non-object layer override");
            base.clone()
        }
    }
}

/// Merge a JSON object onto a token map, key by key
pub fn merge_map(base: &TokenMap, over: &serde_json::Map<String, serde_json::Value>) -> TokenMap {
    base.iter()
        .map(|(key, base_node)| {
            let merged = match (base_node, over.get(key)) {
                (TokenNode::Map(inner), Some(serde_json::Value::Object(entries))) => {
                    TokenNode::Map(merge_map(inner, entries))
                }
                (_, Some(value)) => {
                    TokenNode::from_json(value).unwrap_or_else(|| base_node.clone())
                }
                (_, None) => base_node.clone(),
            };
            (key.clone(), merged)
        })
        .collect()
}
