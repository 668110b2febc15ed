use serde_json::{Map, Value};

/// Flatten a parsed JSON export into its candidate record items.
///
/// Accepted shapes: a list of objects, an object with a `chapters` or
/// `data` array, or a bare single object treated as one record. Items are
/// returned as-is; non-object entries are the normalizer's problem, so
/// their indices stay aligned with the source.
pub fn record_items(root: Value) -> Vec<Value> {
    match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            for key in ["chapters", "data"] {
                if matches!(obj.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = obj.remove(key) {
                        return items;
                    }
                }
            }
            vec![Value::Object(obj)]
        }
        other => vec![other],
    }
}

/// Borrow an item's raw map, if it is object-shaped.
pub fn as_raw_map(item: &Value) -> Option<&Map<String, Value>> {
    item.as_object()
}
