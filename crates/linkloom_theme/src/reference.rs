//! Typed token references
//!
//! A reference is a dotted path such as `"color.base.slate-50"` or
//! `"text.primary"`. Its first segment must name a core or semantic group;
//! there is no free-form path evaluation.

use crate::error::UnresolvedReason;
use crate::tokens::{Layer, TokenBundle, TokenNode, TokenValue, CORE_GROUPS, SEMANTIC_GROUPS};
use smallvec::SmallVec;

/// Maximum number of hops while following semantic references
const MAX_DEPTH: usize = 8;

/// A parsed reference into the core or semantic layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRef {
    pub layer: Layer,
    pub path: SmallVec<[String; 4]>,
}

/// Classification of a string token value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parsed {
    /// Plain CSS value
    Literal,
    /// Reference to a known group
    Reference(TokenRef),
    /// Reference-shaped but the group is unknown (a typo or foreign path)
    UnknownGroup(String),
}

impl TokenRef {
    /// Classify a raw string value
    pub fn parse(raw: &str) -> Parsed {
        if !is_reference_shaped(raw) {
            return Parsed::Literal;
        }
        let path: SmallVec<[String; 4]> = raw.split('.').map(str::to_string).collect();
        let group = path[0].as_str();
        let layer = if CORE_GROUPS.contains(&group) {
            Layer::Core
        } else if SEMANTIC_GROUPS.contains(&group) {
            Layer::Semantic
        } else {
            return Parsed::UnknownGroup(group.to_string());
        };
        Parsed::Reference(TokenRef { layer, path })
    }

    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// `segment(.segment)+`, lowercase alphanumerics and dashes, first char a letter
fn is_reference_shaped(raw: &str) -> bool {
    if !raw.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    let mut segments = 0;
    for segment in raw.split('.') {
        if segment.is_empty()
            || !segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

/// Resolves token values against a bundle
pub struct Resolver<'b> {
    bundle: &'b TokenBundle,
}

impl<'b> Resolver<'b> {
    pub fn new(bundle: &'b TokenBundle) -> Self {
        Self { bundle }
    }

    /// Resolve a semantic or component node to a literal CSS value
    pub fn resolve(&self, node: &TokenNode) -> Result<String, (String, UnresolvedReason)> {
        let mut visited: SmallVec<[String; MAX_DEPTH]> = SmallVec::new();
        self.resolve_node(node, &mut visited)
    }

    fn resolve_node(
        &self,
        node: &TokenNode,
        visited: &mut SmallVec<[String; MAX_DEPTH]>,
    ) -> Result<String, (String, UnresolvedReason)> {
        match node {
            TokenNode::Value(TokenValue::Text(raw)) => match TokenRef::parse(raw) {
                Parsed::Literal => Ok(raw.clone()),
                Parsed::UnknownGroup(group) => {
                    Err((raw.clone(), UnresolvedReason::UnknownGroup(group)))
                }
                Parsed::Reference(reference) => self.follow(&reference, raw, visited),
            },
            TokenNode::Value(value) => Ok(value.to_string()),
            TokenNode::List(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(self.resolve_node(item, visited)?);
                }
                Ok(parts.join(", "))
            }
            TokenNode::Map(_) => Err((String::new(), UnresolvedReason::NotAValue)),
        }
    }

    fn follow(
        &self,
        reference: &TokenRef,
        raw: &str,
        visited: &mut SmallVec<[String; MAX_DEPTH]>,
    ) -> Result<String, (String, UnresolvedReason)> {
        if visited.iter().any(|seen| seen == raw) || visited.len() >= MAX_DEPTH {
            return Err((raw.to_string(), UnresolvedReason::Cycle));
        }

        let target = self
            .bundle
            .lookup(reference.layer, reference.path.as_slice())
            .ok_or_else(|| (raw.to_string(), UnresolvedReason::MissingPath))?;

        match (reference.layer, target) {
            (_, TokenNode::Map(_)) => Err((raw.to_string(), UnresolvedReason::NotAValue)),
            // Core values are primitives and are never followed further
            (Layer::Core, node) => Ok(literal(node)),
            (_, node) => {
                visited.push(raw.to_string());
                let resolved = self.resolve_node(node, visited);
                visited.pop();
                resolved
            }
        }
    }
}

/// Render a node without resolving references
pub fn literal(node: &TokenNode) -> String {
    match node {
        TokenNode::Value(value) => value.to_string(),
        TokenNode::List(items) => items.iter().map(literal).collect::<Vec<_>>().join(", "),
        TokenNode::Map(_) => String::new(),
    }
}
