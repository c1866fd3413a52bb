// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed field access on JSON objects with path-aware errors

use building_info_model::{BuildingError, ComponentName, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Location of a value inside the document, e.g. `$.levels[1].rooms[0].cube`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the document root
    pub fn root() -> Self {
        FieldPath("$".to_string())
    }

    /// Path of a member of this object
    pub fn field(&self, key: &str) -> Self {
        FieldPath(format!("{}.{}", self.0, key))
    }

    /// Path of an element of this array
    pub fn index(&self, index: usize) -> Self {
        FieldPath(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON type name used in error messages
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &FieldPath, expected: &str, actual: &Value) -> BuildingError {
    BuildingError::malformed(
        path.as_str(),
        format!("expected {}, found {}", expected, value_kind(actual)),
    )
}

fn missing(path: &FieldPath) -> BuildingError {
    BuildingError::malformed(path.as_str(), "missing required field")
}

/// Require `value` to be an object
pub fn expect_object<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(path, "an object", value))
}

/// Required string member
pub fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<&'a str> {
    let path = path.field(key);
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(mismatch(&path, "a string", other)),
        None => Err(missing(&path)),
    }
}

/// Optional `name` member; absent or `null` means anonymous
pub fn optional_name(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<ComponentName> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(ComponentName::Anonymous),
        Some(Value::String(s)) => Ok(ComponentName::Named(s.clone())),
        Some(other) => Err(mismatch(&path.field(key), "a string", other)),
    }
}

/// Required array member
pub fn required_array<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<&'a [Value]> {
    let path = path.field(key);
    match object.get(key) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(mismatch(&path, "an array", other)),
        None => Err(missing(&path)),
    }
}

/// Required numeric member
///
/// With `numeric_strings` set, strings holding a finite number (`"50.5"`) are
/// accepted as well.
pub fn required_number(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    numeric_strings: bool,
) -> Result<f64> {
    let path = path.field(key);
    match object.get(key) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| BuildingError::malformed(path.as_str(), "number out of range")),
        Some(Value::String(s)) if numeric_strings => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                BuildingError::malformed(path.as_str(), format!("'{}' is not a number", s))
            }),
        Some(other) => Err(mismatch(&path, "a number", other)),
        None => Err(missing(&path)),
    }
}
