// ABOUTME: Task definition loading and normalization.
// ABOUTME: Prunes empty values and strips server-managed attributes before registration.

use serde_json::Value;
use std::path::Path;

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};

/// Attributes the orchestration service populates on describe calls that are
/// not valid inputs when registering a new task definition.
pub const SERVER_MANAGED_ATTRIBUTES: [&str; 5] = [
    "compatibilities",
    "taskDefinitionArn",
    "requiresAttributes",
    "revision",
    "status",
];

/// Load a task definition file. YAML is a superset of JSON, so both formats
/// parse through the same path.
pub fn load(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    let value: Value = serde_yaml::from_str(&contents)?;
    Ok(value)
}

/// Whether a value carries no information: null, an empty string, or a
/// collection whose members are all (recursively) empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.values().all(is_empty_value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Recursively remove empty values: arrays are filtered, objects lose the key.
pub fn prune_empty(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !is_empty_value(item))
                .map(prune_empty)
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !is_empty_value(v))
                .map(|(k, v)| (k, prune_empty(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Normalize a parsed task definition for registration: prune empty values,
/// then drop the server-managed attributes with one warning each.
pub fn normalize(raw: Value, diag: &mut Diagnostics) -> Value {
    let mut value = prune_empty(raw);
    if let Value::Object(map) = &mut value {
        for attribute in SERVER_MANAGED_ATTRIBUTES {
            if map.shift_remove(attribute).is_some() {
                diag.warn(Warning::server_managed_attribute(format!(
                    "ignoring '{attribute}' in the task definition file: the orchestration \
                     service populates it on describe calls but rejects it on registration; \
                     it can be safely removed from the file"
                )));
            }
        }
    }
    value
}
