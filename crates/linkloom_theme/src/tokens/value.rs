//! Token values and trees

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered map of token keys to nodes
pub type TokenMap = IndexMap<String, TokenNode>;

/// A primitive token value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            TokenValue::Bool(b) => serde_json::Value::Bool(*b),
            TokenValue::Number(n) if is_integral(*n) => serde_json::Value::from(*n as i64),
            TokenValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TokenValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 1e15
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Bool(b) => write!(f, "{b}"),
            TokenValue::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            TokenValue::Number(n) => write!(f, "{n}"),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

/// A node in a token layer: a primitive, a list, or a nested group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Value(TokenValue),
    List(Vec<TokenNode>),
    Map(TokenMap),
}

impl TokenNode {
    pub fn text(value: impl Into<String>) -> Self {
        TokenNode::Value(TokenValue::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        TokenNode::Value(TokenValue::Number(value))
    }

    pub fn as_map(&self) -> Option<&TokenMap> {
        match self {
            TokenNode::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut TokenMap> {
        match self {
            TokenNode::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&TokenValue> {
        match self {
            TokenNode::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Walk nested groups along `path`
    pub fn walk<'a, S: AsRef<str>>(&'a self, path: &[S]) -> Option<&'a TokenNode> {
        let mut node = self;
        for segment in path {
            node = node.as_map()?.get(segment.as_ref())?;
        }
        Some(node)
    }

    /// Convert decoded JSON into a token node
    ///
    /// Returns `None` for `null`. Nulls nested in objects and arrays are
    /// dropped rather than stored.
    pub fn from_json(value: &serde_json::Value) -> Option<TokenNode> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(TokenNode::Value(TokenValue::Bool(*b))),
            serde_json::Value::Number(n) => n.as_f64().map(TokenNode::number),
            serde_json::Value::String(s) => Some(TokenNode::text(s.clone())),
            serde_json::Value::Array(items) => Some(TokenNode::List(
                items.iter().filter_map(TokenNode::from_json).collect(),
            )),
            serde_json::Value::Object(entries) => Some(TokenNode::Map(
                entries
                    .iter()
                    .filter_map(|(k, v)| TokenNode::from_json(v).map(|node| (k.clone(), node)))
                    .collect(),
            )),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TokenNode::Value(value) => value.to_json(),
            TokenNode::List(items) => {
                serde_json::Value::Array(items.iter().map(TokenNode::to_json).collect())
            }
            TokenNode::Map(map) => map_to_json(map),
        }
    }
}

/// Convert a token map into a JSON object
pub fn map_to_json(map: &TokenMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, node)| (k.clone(), node.to_json()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_display_drops_trailing_zero() {
        assert_eq!(TokenValue::Number(400.0).to_string(), "400");
        assert_eq!(TokenValue::Number(1.5).to_string(), "1.5");
        assert_eq!(TokenValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_from_json_drops_nested_nulls() {
        let node = TokenNode::from_json(&json!({"a": null, "b": [1, null, "x"]})).unwrap();
        let map = node.as_map().unwrap();
        assert!(!map.contains_key("a"));
        assert_eq!(
            map["b"],
            TokenNode::List(vec![TokenNode::number(1.0), TokenNode::text("x")])
        );
        assert_eq!(TokenNode::from_json(&json!(null)), None);
    }

    #[test]
    fn test_walk() {
        let node = TokenNode::from_json(&json!({"base": {"white": "#fff"}})).unwrap();
        assert_eq!(node.walk(&["base", "white"]), Some(&TokenNode::text("#fff")));
        assert_eq!(node.walk(&["base", "black"]), None);
        assert_eq!(node.walk(&["base", "white", "deeper"]), None);
    }
}
