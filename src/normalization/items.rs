use serde_json::Value;

/// Keys checked, in priority order, when the document root is an object.
const ITEM_KEYS: [&str; 3] = ["products", "items", "data"];

/// Pulls a flat list of catalog entries out of an arbitrary top-level
/// document shape.
///
/// - list root -> returned verbatim
/// - object root -> the first of `products` / `items` / `data` holding a
///   list wins; with no recognized key, every list-valued entry is
///   concatenated in document order
/// - anything else -> empty
///
/// `serde_json` is built with `preserve_order`, so "document order" here is
/// the order keys appear in the response body.
pub fn extract_items(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            for key in ITEM_KEYS {
                if let Some(Value::Array(items)) = map.get(key) {
                    return items.clone();
                }
            }
            let mut merged = Vec::new();
            for value in map.values() {
                if let Value::Array(items) = value {
                    merged.extend(items.iter().cloned());
                }
            }
            merged
        }
        _ => Vec::new(),
    }
}
