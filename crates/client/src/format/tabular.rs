use serde_json::{Map, Value, json};

use super::ResultShape;

pub(super) fn format(raw: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    match ResultShape::detect(raw) {
        ResultShape::Ask(answer) => {
            out.insert("type".into(), Value::from("ASK"));
            out.insert("value".into(), Value::Bool(answer));
        }
        ResultShape::Select { vars, bindings } => {
            let (columns, rows) = tabulate(&vars, bindings);
            out.insert("type".into(), Value::from("SELECT"));
            out.insert("columns".into(), columns);
            out.insert("rows".into(), rows);
        }
        ResultShape::Empty { vars } => {
            let (columns, rows) = tabulate(&vars, &[]);
            out.insert("type".into(), Value::from("SELECT"));
            out.insert("columns".into(), columns);
            out.insert("rows".into(), rows);
        }
        ResultShape::Graph => {
            out.insert("type".into(), Value::from("GRAPH"));
            out.insert("results".into(), raw.clone());
        }
    }
    out
}

/// Build `[{name, label}]` column definitions and one positional row per
/// binding, with `null` for unbound variables.
pub fn tabulate(vars: &[&str], bindings: &[Value]) -> (Value, Value) {
    let columns = vars.iter().map(|var| json!({ "name": var, "label": var })).collect();

    let rows = bindings
        .iter()
        .map(|binding| {
            vars.iter()
                .map(|var| binding.get(*var).and_then(|term| term.get("value")).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .map(Value::Array)
        .collect();

    (Value::Array(columns), Value::Array(rows))
}
