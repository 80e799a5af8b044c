use serde_json::{Map, Value};

use super::ResultShape;

pub(super) fn format(raw: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    match ResultShape::detect(raw) {
        ResultShape::Ask(answer) => {
            out.insert("type".into(), Value::from("ASK"));
            out.insert("result".into(), Value::Bool(answer));
        }
        ResultShape::Select { vars, bindings } => {
            out.insert("type".into(), Value::from("SELECT"));
            out.insert("results".into(), Value::Array(simplify_bindings(&vars, bindings)));
        }
        ResultShape::Empty { .. } => {
            out.insert("type".into(), Value::from("SELECT"));
            out.insert("results".into(), Value::Array(Vec::new()));
        }
        ResultShape::Graph => {
            out.insert("type".into(), Value::from("GRAPH"));
            out.insert("results".into(), raw.clone());
        }
    }
    out
}

/// Flatten SPARQL bindings into one object per row.
///
/// Each variable maps to its plain value, or `null` when unbound. Typed
/// literals add `{var}_datatype` and tagged literals add `{var}_lang`.
pub fn simplify_bindings(vars: &[&str], bindings: &[Value]) -> Vec<Value> {
    bindings
        .iter()
        .map(|binding| {
            let mut row = Map::new();
            for var in vars {
                match binding.get(*var) {
                    Some(term) => {
                        row.insert((*var).to_string(), term.get("value").cloned().unwrap_or(Value::Null));
                        if let Some(datatype) = term.get("datatype") {
                            row.insert(format!("{var}_datatype"), datatype.clone());
                        }
                        if let Some(lang) = term.get("xml:lang") {
                            row.insert(format!("{var}_lang"), lang.clone());
                        }
                    }
                    None => {
                        row.insert((*var).to_string(), Value::Null);
                    }
                }
            }
            Value::Object(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::select_fixture;
    use serde_json::json;

    #[test]
    fn test_select_rows() {
        let out = format(&select_fixture());
        assert_eq!(out["type"], "SELECT");
        assert_eq!(
            out["results"],
            json!([
                {
                    "act": "http://data.legilux.public.lu/eli/etat/leg/loi/2020/01/01/a1",
                    "title": "Loi du 1er janvier",
                    "title_lang": "fr",
                    "date": "2020-01-01",
                    "date_datatype": "http://www.w3.org/2001/XMLSchema#date"
                },
                {
                    "act": "http://data.legilux.public.lu/eli/etat/leg/rgd/2021/02/03/a2",
                    "title": null,
                    "date": null
                }
            ])
        );
    }

    #[test]
    fn test_ask() {
        let out = format(&json!({ "head": {}, "boolean": true }));
        assert_eq!(Value::Object(out), json!({ "type": "ASK", "result": true }));
    }

    #[test]
    fn test_empty_head_only() {
        let out = format(&json!({ "head": { "vars": ["s"] } }));
        assert_eq!(Value::Object(out), json!({ "type": "SELECT", "results": [] }));
    }

    #[test]
    fn test_graph_passthrough() {
        let raw = json!({ "@context": {}, "@graph": [{ "@id": "x" }] });
        let out = format(&raw);
        assert_eq!(out["type"], "GRAPH");
        assert_eq!(out["results"], raw);
    }
}
