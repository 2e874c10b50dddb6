// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::fuzzer::utils::{is_digit_only, is_ignored_parameter};
use crate::request::JsonNode;

/// One mutated document plus the leaf it changed
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCandidate {
    pub document: JsonNode,
    pub original_value: String,
    pub modified_value: String,
}

/// Every document reachable by changing exactly one leaf of `node`.
///
/// Integer leaves only take digit-only probes; string leaves take all of
/// them. Containers recurse element by element, copying everything else.
pub fn fuzz_json(node: &JsonNode, probes: &[String], append: bool) -> Vec<JsonCandidate> {
    match node {
        JsonNode::Integer(n) => probes
            .iter()
            .filter(|probe| is_digit_only(probe))
            .filter_map(|probe| {
                let fuzzed = if append {
                    format!("{}{}", n, probe).parse::<i64>().ok()?
                } else {
                    probe.parse::<i64>().ok()?
                };
                Some(JsonCandidate {
                    document: JsonNode::Integer(fuzzed),
                    original_value: n.to_string(),
                    modified_value: fuzzed.to_string(),
                })
            })
            .collect(),

        JsonNode::Text(text) => probes
            .iter()
            .map(|probe| {
                let fuzzed = if append {
                    format!("{}{}", text, probe)
                } else {
                    probe.clone()
                };
                JsonCandidate {
                    modified_value: fuzzed.clone(),
                    document: JsonNode::Text(fuzzed),
                    original_value: text.clone(),
                }
            })
            .collect(),

        JsonNode::Sequence(items) => {
            let mut candidates = Vec::new();
            for (index, item) in items.iter().enumerate() {
                for candidate in fuzz_json(item, probes, append) {
                    let mut copy = items.clone();
                    copy[index] = candidate.document;
                    candidates.push(JsonCandidate {
                        document: JsonNode::Sequence(copy),
                        ..candidate
                    });
                }
            }
            candidates
        }

        JsonNode::Mapping(members) => {
            let mut candidates = Vec::new();
            for (index, (key, value)) in members.iter().enumerate() {
                if is_ignored_parameter(key) {
                    continue;
                }
                for candidate in fuzz_json(value, probes, append) {
                    let mut copy = members.clone();
                    copy[index].1 = candidate.document;
                    candidates.push(JsonCandidate {
                        document: JsonNode::Mapping(copy),
                        ..candidate
                    });
                }
            }
            candidates
        }

        JsonNode::Opaque(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_integer_leaf_policy() {
        let doc = JsonNode::parse(r#"{"x": 5}"#).unwrap();

        let replaced = fuzz_json(&doc, &probes(&["7", "abc"]), false);
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].document.to_string(), r#"{"x":7}"#);
        assert_eq!(replaced[0].original_value, "5");

        let appended = fuzz_json(&doc, &probes(&["7"]), true);
        assert_eq!(appended[0].document.to_string(), r#"{"x":57}"#);
    }

    #[test]
    fn test_overflow_is_skipped() {
        let doc = JsonNode::Integer(i64::MAX);
        assert!(fuzz_json(&doc, &probes(&["9"]), true).is_empty());
        assert!(fuzz_json(&doc, &probes(&["99999999999999999999"]), false).is_empty());
    }

    #[test]
    fn test_nested_coverage() {
        let doc = JsonNode::parse(r#"{"a": ["x", {"b": "y"}], "c": 1, "d": null}"#).unwrap();
        let candidates = fuzz_json(&doc, &probes(&["P"]), false);

        // two string leaves; the integer ignores a textual probe; null is opaque
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].document.to_string(), r#"{"a":["P",{"b":"y"}],"c":1,"d":null}"#);
        assert_eq!(candidates[1].document.to_string(), r#"{"a":["x",{"b":"P"}],"c":1,"d":null}"#);
        assert_eq!(candidates[1].original_value, "y");
    }

    #[test]
    fn test_reserved_keys_are_not_fuzzed() {
        let doc = JsonNode::parse(r#"{"JSESSIONID": "s", "q": "v"}"#).unwrap();
        let candidates = fuzz_json(&doc, &probes(&["P"]), true);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].modified_value, "vP");
    }
}
