//! Conversion of raw MongoDB documents into API JSON.
//!
//! Projected list results are not guaranteed to contain every field of the
//! typed model, so they are rendered from the raw document instead.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Render a stored document as response JSON.
///
/// The top-level `_id` is exposed as `id`; object ids become hex strings and
/// dates become RFC 3339 strings.
pub fn document_to_json(doc: Document) -> Value {
    let mut object = Map::with_capacity(doc.len());
    for (key, value) in doc {
        let key = if key == "_id" { "id".to_string() } else { key };
        object.insert(key, bson_to_json(value));
    }
    Value::Object(object)
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => {
            serde_json::to_value(dt.to_chrono()).unwrap_or(Value::Null)
        }
        Bson::Double(n) => Value::from(n),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(inner) => Value::Object(
            inner
                .into_iter()
                .map(|(k, v)| (k, bson_to_json(v)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}
