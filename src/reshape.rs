//! Client-side emulation of backend capabilities.
//!
//! Backends without partial-response support return whole records; these
//! helpers trim them down to what the caller asked for. Backends without name
//! filtering return every set of a dataset; [`filter_by_name`] narrows them.

use serde_json::{Map, Value};

/// Keep only `fields` in each record of the `list_key` array.
///
/// Keys a record does not have are skipped. A missing or non-array list is
/// left alone.
pub fn project_records(content: &mut Value, list_key: &str, fields: &[&str]) {
    let Some(records) = content.get_mut(list_key).and_then(Value::as_array_mut) else {
        return;
    };
    for record in records.iter_mut() {
        if let Value::Object(map) = record {
            let projected: Map<String, Value> = fields
                .iter()
                .filter_map(|&field| map.remove(field).map(|v| (field.to_string(), v)))
                .collect();
            *map = projected;
        }
    }
}

/// Drop records whose `name` does not contain `name` (case-insensitive).
pub fn filter_by_name(content: &mut Value, list_key: &str, name: &str) {
    if name.is_empty() {
        return;
    }
    let Some(records) = content.get_mut(list_key).and_then(Value::as_array_mut) else {
        return;
    };
    let needle = name.to_lowercase();
    records.retain(|record| {
        record
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| n.to_lowercase().contains(&needle))
    });
}

/// Split a comma-separated parameter, dropping empty entries.
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
