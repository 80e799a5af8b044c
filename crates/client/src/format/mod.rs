//! Formatting of SPARQL JSON results.
//!
//! Converts a raw `application/sparql-results+json` document into one of the
//! [`ResultFormat`] shapes:
//!
//! - **json**: the document as returned, plus `metadata`
//! - **simplified**: bindings flattened to `{variable: value}` objects
//! - **tabular**: `columns` and positional `rows`
//!
//! ASK results become `{"type": "ASK", ...}` and CONSTRUCT/DESCRIBE documents
//! are passed through under `{"type": "GRAPH", "results": ...}`.

mod simplified;
mod tabular;

use legilux_core::ResultFormat;
use serde_json::{Map, Value};

pub use simplified::simplify_bindings;
pub use tabular::tabulate;

/// Options shared by every formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Attach a `metadata` object describing the result.
    pub include_metadata: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { include_metadata: true }
    }
}

/// Kind of result document, detected from its top-level keys.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultShape<'a> {
    /// ASK query answer.
    Ask(bool),
    /// SELECT result with its head variables and binding rows.
    Select { vars: Vec<&'a str>, bindings: &'a [Value] },
    /// SELECT head with no `results` section.
    Empty { vars: Vec<&'a str> },
    /// Anything else, e.g. a CONSTRUCT/DESCRIBE graph.
    Graph,
}

impl<'a> ResultShape<'a> {
    pub fn detect(raw: &'a Value) -> Self {
        if let Some(answer) = raw.get("boolean") {
            return ResultShape::Ask(answer.as_bool().unwrap_or(false));
        }

        let vars = head_vars(raw);
        if let Some(bindings) = raw.get("results").and_then(|r| r.get("bindings")).and_then(Value::as_array) {
            return ResultShape::Select { vars, bindings };
        }

        let results_missing = match raw.get("results") {
            None | Some(Value::Null) => true,
            Some(Value::Object(map)) => map.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        };
        if raw.get("head").is_some() && results_missing {
            return ResultShape::Empty { vars };
        }

        ResultShape::Graph
    }
}

fn head_vars(raw: &Value) -> Vec<&str> {
    raw.get("head")
        .and_then(|h| h.get("vars"))
        .and_then(Value::as_array)
        .map(|vars| vars.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Format `raw` as `format`, attaching metadata when enabled.
///
/// `query` is recorded in the metadata when given.
pub fn format_results(raw: &Value, format: ResultFormat, options: FormatOptions, query: Option<&str>) -> Value {
    let mut formatted = match format {
        ResultFormat::Json => match raw {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("results".into(), other.clone());
                map
            }
        },
        ResultFormat::Simplified => simplified::format(raw),
        ResultFormat::Tabular => tabular::format(raw),
    };

    if options.include_metadata {
        formatted.insert("metadata".into(), Value::Object(metadata(raw, query)));
    }

    Value::Object(formatted)
}

/// Describe a raw result: head variables and links, then either the binding
/// count or the ASK marker, then the query text.
pub fn metadata(raw: &Value, query: Option<&str>) -> Map<String, Value> {
    let mut meta = Map::new();

    if let Some(head) = raw.get("head") {
        let empty = || Value::Array(Vec::new());
        meta.insert("variables".into(), head.get("vars").cloned().unwrap_or_else(empty));
        let links = head.get("link").or_else(|| head.get("links"));
        meta.insert("links".into(), links.cloned().unwrap_or_else(empty));
    }

    if let Some(bindings) = raw.get("results").and_then(|r| r.get("bindings")).and_then(Value::as_array) {
        meta.insert("count".into(), Value::from(bindings.len()));
    } else if raw.get("boolean").is_some() {
        meta.insert("type".into(), Value::from("ASK"));
    }

    if let Some(query) = query {
        meta.insert("query".into(), Value::from(query));
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(super) fn select_fixture() -> Value {
        json!({
            "head": { "vars": ["act", "title", "date"], "link": ["http://example.org/info"] },
            "results": {
                "bindings": [
                    {
                        "act": { "type": "uri", "value": "http://data.legilux.public.lu/eli/etat/leg/loi/2020/01/01/a1" },
                        "title": { "type": "literal", "value": "Loi du 1er janvier", "xml:lang": "fr" },
                        "date": { "type": "literal", "value": "2020-01-01", "datatype": "http://www.w3.org/2001/XMLSchema#date" }
                    },
                    {
                        "act": { "type": "uri", "value": "http://data.legilux.public.lu/eli/etat/leg/rgd/2021/02/03/a2" }
                    }
                ]
            }
        })
    }

    #[test]
    fn test_detect_shapes() {
        let select = select_fixture();
        assert!(matches!(ResultShape::detect(&select), ResultShape::Select { ref vars, bindings } if vars.len() == 3 && bindings.len() == 2));

        let ask = json!({ "head": {}, "boolean": true });
        assert_eq!(ResultShape::detect(&ask), ResultShape::Ask(true));

        let empty = json!({ "head": { "vars": ["s"] } });
        assert_eq!(ResultShape::detect(&empty), ResultShape::Empty { vars: vec!["s"] });

        let graph = json!({ "@graph": [] });
        assert_eq!(ResultShape::detect(&graph), ResultShape::Graph);
    }

    #[test]
    fn test_json_passthrough_with_metadata() {
        let raw = select_fixture();
        let out = format_results(&raw, ResultFormat::Json, FormatOptions::default(), Some("SELECT ..."));

        assert_eq!(out["results"], raw["results"]);
        assert_eq!(out["head"], raw["head"]);
        assert_eq!(out["metadata"]["count"], 2);
        assert_eq!(out["metadata"]["variables"], json!(["act", "title", "date"]));
        assert_eq!(out["metadata"]["links"], json!(["http://example.org/info"]));
        assert_eq!(out["metadata"]["query"], "SELECT ...");
    }

    #[test]
    fn test_metadata_can_be_disabled() {
        let raw = select_fixture();
        let out = format_results(&raw, ResultFormat::Tabular, FormatOptions { include_metadata: false }, Some("q"));
        assert!(out.get("metadata").is_none());
    }

    #[test]
    fn test_ask_metadata() {
        let raw = json!({ "head": {}, "boolean": false });
        let meta = metadata(&raw, None);
        assert_eq!(meta.get("type"), Some(&Value::from("ASK")));
        assert!(meta.get("count").is_none());
        assert!(meta.get("query").is_none());
        assert_eq!(meta.get("variables"), Some(&json!([])));
    }
}
