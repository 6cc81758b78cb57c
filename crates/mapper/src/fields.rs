//! Typed field extraction over schema-specific key aliases.
//!
//! The two provider API versions disagree on key casing (`ContainerNumber`
//! vs `containerNumber`), and the original engine probed for fields with
//! chained dynamic property access. Here every mapper instead declares its
//! alias list explicitly and goes through these helpers, which return typed
//! optionals: a field is either present with usable content or it is `None`.

use std::collections::HashMap;

use serde_json::Value;

/// Extracts a non-empty string field, trying the aliases in order. JSON
/// numbers are accepted and stringified — providers are not consistent about
/// quoting waybill numbers.
pub(crate) fn str_field(payload: &Value, aliases: &[&str]) -> Option<String> {
    let map = payload.as_object()?;
    for alias in aliases {
        match map.get(*alias) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Extracts an array field, trying the aliases in order.
pub(crate) fn array_field<'a>(payload: &'a Value, aliases: &[&str]) -> Option<&'a Vec<Value>> {
    let map = payload.as_object()?;
    for alias in aliases {
        if let Some(Value::Array(items)) = map.get(*alias) {
            return Some(items);
        }
    }
    None
}

/// Extracts a nested value (object or scalar), trying the aliases in order.
pub(crate) fn value_field<'a>(payload: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = payload.as_object()?;
    for alias in aliases {
        if let Some(value) = map.get(*alias) {
            if !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// Reads a spreadsheet cell: trims, and treats empty as absent.
pub(crate) fn cell(row: &HashMap<String, String>, column: &str) -> Option<String> {
    row.get(column).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Converts a spreadsheet row into a JSON object for the `raw_payload`
/// pass-through.
pub(crate) fn row_to_value(row: &HashMap<String, String>) -> Value {
    Value::Object(
        row.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Reinterprets a flat JSON object as a spreadsheet row. Returns `None` when
/// the payload has nested structure — those are provider schemas, not rows.
pub(crate) fn row_from_json(payload: &Value) -> Option<HashMap<String, String>> {
    let map = payload.as_object()?;
    let mut row = HashMap::with_capacity(map.len());
    for (key, value) in map {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => return None,
        };
        row.insert(key.clone(), text);
    }
    Some(row)
}
