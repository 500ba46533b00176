//! Defensive readers for loosely-shaped backend JSON.
//!
//! The backend is not consistent about field names or envelopes: a team's
//! point total may arrive as `points`, `pts` or `totalPoints`, an id as
//! `_id` or `id`, and a list either bare or wrapped in `{data: [...]}`.
//! Each reader takes a list of candidate keys and returns the first usable
//! value.

use serde_json::{Map, Value};

const ENVELOPE_KEYS: [&str; 4] = ["data", "items", "results", "rows"];

/// First present, non-null value among `keys`.
pub fn pick<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|candidate| !candidate.is_null())
}

/// First non-blank string among `keys`. Numbers are stringified.
pub fn pick_str(value: &Value, keys: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    keys.iter().filter_map(|key| map.get(*key)).find_map(scalar_string)
}

/// First numeric value among `keys`; numeric strings are accepted.
pub fn pick_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    let map = value.as_object()?;
    keys.iter().filter_map(|key| map.get(*key)).find_map(as_number)
}

/// Integer variant of [`pick_f64`]; fractional values are truncated.
#[allow(clippy::cast_possible_truncation)]
pub fn pick_i64(value: &Value, keys: &[&str]) -> Option<i64> {
    let map = value.as_object()?;
    keys.iter().filter_map(|key| map.get(*key)).find_map(|candidate| {
        candidate
            .as_i64()
            .or_else(|| as_number(candidate).map(|float| float as i64))
    })
}

/// First boolean among `keys`; `"true"`/`"false"` and `0`/`1` are accepted.
pub fn pick_bool(value: &Value, keys: &[&str]) -> Option<bool> {
    let map = value.as_object()?;
    keys.iter().filter_map(|key| map.get(*key)).find_map(|candidate| match candidate {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Record identifier: `_id` first, then `id`.
pub fn record_id(value: &Value) -> Option<String> {
    pick_str(value, &["_id", "id"])
}

/// Identifier of a reference that may be an embedded object or a bare id.
///
/// `{"team": {"_id": "t1"}}` and `{"team": "t1"}` both yield `"t1"`.
pub fn reference_id(value: &Value, keys: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    keys.iter().filter_map(|key| map.get(*key)).find_map(|candidate| match candidate {
        Value::Object(_) => record_id(candidate),
        other => scalar_string(other),
    })
}

/// String field of an embedded object, e.g. `team.name`, when present.
pub fn pick_nested_str(value: &Value, object_keys: &[&str], field_keys: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    object_keys
        .iter()
        .filter_map(|key| map.get(*key))
        .filter(|candidate| candidate.is_object())
        .find_map(|candidate| pick_str(candidate, field_keys))
}

/// Unwrap a list response.
///
/// Accepts a bare array, an object holding an array under one of `keys` or
/// a common envelope key, and one level of nesting such as
/// `{"data": {"teams": [...]}}`.
pub fn unwrap_list<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    if let Some(items) = value.as_array() {
        return items;
    }
    let Some(map) = value.as_object() else {
        return &[];
    };
    if let Some(items) = find_array(map, keys) {
        return items;
    }
    for envelope in ENVELOPE_KEYS {
        if let Some(inner) = map.get(envelope).and_then(Value::as_object) {
            if let Some(items) = find_array(inner, keys) {
                return items;
            }
        }
    }
    &[]
}

/// Unwrap a single-record response: `{"data": {...}}`, `{"team": {...}}` or
/// the record itself.
pub fn unwrap_object<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    for key in keys.iter().copied().chain(ENVELOPE_KEYS) {
        if let Some(inner) = map.get(key).filter(|inner| inner.is_object()) {
            if let Some(nested) = unwrap_object_shallow(inner, keys) {
                return Some(nested);
            }
            return Some(inner);
        }
    }
    Some(value)
}

fn unwrap_object_shallow<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|inner| inner.is_object())
}

fn find_array<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .copied()
        .chain(ENVELOPE_KEYS)
        .filter_map(|key| map.get(key))
        .find_map(|candidate| candidate.as_array().map(Vec::as_slice))
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
