//! JSON bodies: a single flat object.

use serde_json::Value;

use crate::entries::{EntryValue, KeyValueList};
use crate::error::CodecError;

/// Encode `list` as a compact JSON object in list order.
pub fn encode(list: &KeyValueList) -> Result<String, CodecError> {
    let out = serde_json::to_string(&list.to_map()).map_err(|e| CodecError::Json(e.to_string()))?;
    tracing::trace!(bytes = out.len(), "encoded JSON body");
    Ok(out)
}

/// Decode a JSON body. Anything other than an object yields no entries.
pub fn decode(raw: &str) -> Result<KeyValueList, CodecError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| CodecError::Json(e.to_string()))?;
    let Value::Object(object) = value else {
        tracing::debug!("JSON body is not an object, no entries");
        return Ok(KeyValueList::new());
    };
    Ok(object.into_iter().map(|(key, value)| (key, entry_value(value))).collect())
}

/// Strings and arrays of strings map directly. Other values are outside the
/// payload model and are kept as their JSON text so nothing is dropped.
fn entry_value(value: Value) -> EntryValue {
    match value {
        Value::String(s) => EntryValue::Text(s),
        Value::Array(items) if items.iter().all(Value::is_string) => EntryValue::List(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        other => EntryValue::Text(other.to_string()),
    }
}
