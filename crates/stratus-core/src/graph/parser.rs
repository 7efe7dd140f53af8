//! Assertion-list loader
//!
//! One assertion per line, three whitespace-separated fields:
//!
//! ```text
//! /instance<inst_1>	"has_type"@[]	"/instance"^^type:text
//! /instance<inst_1>	"property"@[]	"{"Key":"Name","Value":"redis"}"^^type:text
//! /subnet<sub_1>	"parent_of"@[]	/instance<inst_1>
//! ```
//!
//! Blank lines and `#` comments are skipped.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use super::model::{NodeRef, Predicate, PropertyValue, ResourceType, Triple};
use super::store::Graph;
use crate::errors::{Result, StratusError};
use crate::{log_op_end, log_op_error, log_op_start};

const TEXT_LITERAL_SUFFIX: &str = "^^type:text";
const PREDICATE_SUFFIX: &str = "@[]";

#[derive(Deserialize)]
struct PropertyLiteral {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Value", default)]
    value: serde_json::Value,
}

/// Parse a whole assertion list into a graph
///
/// Repeated identical lines collapse into one assertion. Two different
/// values for the same property of the same node are rejected.
pub fn parse_assertions(input: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    let mut assigned: HashMap<(NodeRef, String), usize> = HashMap::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let triple = parse_triple(line, line_no)?;
        if let Predicate::Property { key, .. } = &triple.predicate {
            if !graph.contains_triple(&triple.key()) {
                let slot = (triple.subject.clone(), key.clone());
                if let Some(first) = assigned.insert(slot, line_no) {
                    return Err(StratusError::MalformedAssertion {
                        line: line_no,
                        reason: format!(
                            "property '{}' of {} already set at line {}",
                            key, triple.subject, first
                        ),
                    });
                }
            }
        }
        graph.add(triple);
    }
    Ok(graph)
}

/// Parse one assertion line; `line_no` is only used for error reporting
pub fn parse_triple(line: &str, line_no: usize) -> Result<Triple> {
    let malformed = |reason: String| StratusError::MalformedAssertion {
        line: line_no,
        reason,
    };

    let (subject, rest) = split_field(line.trim())
        .ok_or_else(|| malformed("expected subject, predicate and object".to_string()))?;
    let (predicate, object) =
        split_field(rest).ok_or_else(|| malformed("missing object".to_string()))?;

    let subject = parse_node_ref(subject).map_err(&malformed)?;
    let predicate = predicate
        .strip_suffix(PREDICATE_SUFFIX)
        .and_then(unquote)
        .ok_or_else(|| malformed(format!("invalid predicate '{}'", predicate)))?;

    match predicate {
        "has_type" => {
            let declared = text_literal(object)
                .and_then(|s| s.strip_prefix('/'))
                .ok_or_else(|| malformed(format!("invalid type literal '{}'", object)))?;
            let declared = parse_type(declared).map_err(&malformed)?;
            if declared != subject.resource_type {
                return Err(malformed(format!(
                    "declared type '{}' does not match subject {}",
                    declared, subject
                )));
            }
            Ok(Triple::has_type(subject))
        }
        "property" => {
            let json = text_literal(object)
                .ok_or_else(|| malformed(format!("invalid property literal '{}'", object)))?;
            let literal: PropertyLiteral = serde_json::from_str(json)
                .map_err(|e| malformed(format!("invalid property JSON: {}", e)))?;
            Ok(Triple::property(
                subject,
                literal.key,
                PropertyValue::from_json(&literal.value),
            ))
        }
        "parent_of" => {
            let child = parse_node_ref(object).map_err(&malformed)?;
            Ok(Triple::parent_of(subject, child))
        }
        other => Err(malformed(format!("unknown predicate '{}'", other))),
    }
}

/// Split off the first whitespace-delimited field
fn split_field(s: &str) -> Option<(&str, &str)> {
    let idx = s.find(char::is_whitespace)?;
    let rest = s[idx..].trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((&s[..idx], rest))
}

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')?.strip_suffix('"')
}

/// `"<text>"^^type:text` → `<text>`
fn text_literal(s: &str) -> Option<&str> {
    s.trim().strip_suffix(TEXT_LITERAL_SUFFIX).and_then(unquote)
}

fn parse_type(name: &str) -> std::result::Result<ResourceType, String> {
    name.parse::<ResourceType>()
        .map_err(|_| format!("unknown resource type '{}'", name))
}

/// `/<type><<id>>`
fn parse_node_ref(s: &str) -> std::result::Result<NodeRef, String> {
    let invalid = || format!("invalid node reference '{}'", s);
    let body = s
        .trim()
        .strip_prefix('/')
        .and_then(|b| b.strip_suffix('>'))
        .ok_or_else(invalid)?;
    let (type_name, id) = body.split_once('<').ok_or_else(invalid)?;
    if id.is_empty() {
        return Err(invalid());
    }
    Ok(NodeRef::new(parse_type(type_name)?, id))
}

impl FromStr for Graph {
    type Err = StratusError;

    fn from_str(s: &str) -> Result<Self> {
        parse_assertions(s)
    }
}

impl Graph {
    /// Load an assertion list from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let start = Instant::now();
        let path = path.as_ref();
        log_op_start!("load_graph", path = %path.display());

        let result = std::fs::read_to_string(path)
            .map_err(StratusError::from)
            .and_then(|content| parse_assertions(&content));

        let duration = start.elapsed().as_millis() as u64;
        match &result {
            Ok(graph) => {
                log_op_end!("load_graph", duration_ms = duration, triple_count = graph.len());
            }
            Err(e) => {
                log_op_error!("load_graph", e.clone(), duration_ms = duration);
            }
        }
        result
    }
}
