#![doc = include_str!("../README.md")]

mod error;

pub use error::JsonError;

use arbor_value::{Array, Number, Struct, Value};
use serde_json::Value as JsonValue;

/// Convert a parsed JSON document into a value tree. Object keys keep their
/// document order and numbers keep their literal text.
pub fn from_json(json: &JsonValue) -> Result<Value, JsonError> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Number(Number::parse(n.to_string())?),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::Array(
            items
                .iter()
                .map(from_json)
                .collect::<Result<Array, _>>()?,
        ),
        JsonValue::Object(fields) => Value::Struct(
            fields
                .iter()
                .map(|(key, value)| Ok::<_, JsonError>((key.as_str(), from_json(value)?)))
                .collect::<Result<Struct, _>>()?,
        ),
    })
}

pub fn to_json(value: &Value) -> Result<JsonValue, JsonError> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Number(n) => JsonValue::Number(convert_number(n)?),
        Value::Array(items) => JsonValue::Array(
            items
                .iter()
                .map(to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Struct(fields) => {
            let mut result = serde_json::Map::new();
            for (key, value) in fields.iter() {
                result.insert(key.to_string(), to_json(value)?);
            }
            JsonValue::Object(result)
        }
    })
}

// The canonical text is already a JSON number literal, so the conversion is
// lossless at any width.
fn convert_number(number: &Number) -> Result<serde_json::Number, JsonError> {
    Ok(number.as_str().parse()?)
}

pub fn parse_str(text: &str) -> Result<Value, JsonError> {
    let json: JsonValue = serde_json::from_str(text)?;
    from_json(&json)
}

/// Compact JSON text of a value tree.
pub fn to_json_string(value: &Value) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&to_json(value)?)?)
}

pub fn to_json_string_pretty(value: &Value) -> Result<String, JsonError> {
    Ok(serde_json::to_string_pretty(&to_json(value)?)?)
}
