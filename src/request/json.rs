// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde_json::{Map, Number, Value};
use std::fmt;

use crate::errors::{MutationError, MutationResult};

/// A JSON document as a closed set of node kinds.
///
/// Integers that fit `i64`, strings, arrays and objects are mutable.
/// Everything else (null, booleans, floats, huge unsigned numbers) is kept
/// verbatim as `Opaque` and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Integer(i64),
    Text(String),
    Sequence(Vec<JsonNode>),
    /// Object members in document order
    Mapping(Vec<(String, JsonNode)>),
    Opaque(Value),
}

impl JsonNode {
    pub fn parse(raw: &str) -> MutationResult<Self> {
        serde_json::from_str::<Value>(raw)
            .map(Self::from)
            .map_err(|e| MutationError::invalid_request(format!("body is not JSON: {}", e)))
    }

    pub fn to_value(&self) -> Value {
        match self {
            JsonNode::Integer(n) => Value::Number(Number::from(*n)),
            JsonNode::Text(s) => Value::String(s.clone()),
            JsonNode::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            JsonNode::Mapping(members) => {
                let mut map = Map::new();
                for (key, node) in members {
                    map.insert(key.clone(), node.to_value());
                }
                Value::Object(map)
            }
            JsonNode::Opaque(value) => value.clone(),
        }
    }

    /// Number of mutable leaves (integers and strings)
    pub fn leaf_count(&self) -> usize {
        match self {
            JsonNode::Integer(_) | JsonNode::Text(_) => 1,
            JsonNode::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
            JsonNode::Mapping(members) => members.iter().map(|(_, node)| node.leaf_count()).sum(),
            JsonNode::Opaque(_) => 0,
        }
    }
}

impl From<Value> for JsonNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => JsonNode::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => JsonNode::Integer(i),
                None => JsonNode::Opaque(Value::Number(n)),
            },
            Value::Array(items) => JsonNode::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                JsonNode::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            other => JsonNode::Opaque(other),
        }
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Leaves print bare, the way they appear as mutant values
            JsonNode::Integer(n) => write!(f, "{}", n),
            JsonNode::Text(s) => f.write_str(s),
            _ => write!(f, "{}", self.to_value()),
        }
    }
}
