use serde_json::{Map, Value};

/// Collapses a loosely-typed field value into a uniform list of records.
///
/// The remote catalog sends category/price/image fields in whatever shape its
/// backend happened to produce: a list of objects, a single object, a
/// JSON-encoded string, or a bare scalar. Downstream code always reads
/// `result[0].get(subkey)`, so everything is folded into a list:
///
/// - absent or `null` -> empty list
/// - string -> parsed as JSON and re-normalized; unparseable strings become
///   `[{key_name: raw}]` when `key_name` is given, else `[raw]`
/// - list -> returned as-is, elements untouched
/// - object -> wrapped in a one-element list
/// - any other scalar -> stringified and keyed like the unparseable case
pub fn normalize_field(raw: Option<&Value>, key_name: Option<&str>) -> Vec<Value> {
    let raw = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(value) => value,
    };

    match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => normalize_field(Some(&parsed), key_name),
            Err(_) => vec![keyed(key_name, Value::String(text.clone()))],
        },
        Value::Array(items) => items.clone(),
        Value::Object(_) => vec![raw.clone()],
        scalar => vec![keyed(key_name, Value::String(stringify_scalar(scalar)))],
    }
}

fn keyed(key_name: Option<&str>, value: Value) -> Value {
    match key_name {
        Some(key) => {
            let mut record = Map::new();
            record.insert(key.to_string(), value);
            Value::Object(record)
        }
        None => value,
    }
}

fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
