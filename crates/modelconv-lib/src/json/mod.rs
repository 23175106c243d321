//! Thin wrapper over `serde_json` providing a consistent, fallible conversion interface.
//!
//! Every function here returns a classified [`ConvertError`]. The
//! [`crate::convert`] module builds the absence-on-failure surface on top of it.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::Layout;
use crate::errors::{ConvertError, Result};

pub mod guard;

fn write<T: Serialize + ?Sized>(value: &T, layout: Layout) -> serde_json::Result<Vec<u8>> {
    match layout {
        Layout::Compact => serde_json::to_vec(value),
        Layout::Pretty => serde_json::to_vec_pretty(value),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize a model to UTF-8 JSON bytes.
pub fn to_bytes<T: Serialize + ?Sized>(model: &T, layout: Layout) -> Result<Vec<u8>> {
    guard::check_finite(model).map_err(|e| ConvertError::Encoding(e.to_string()))?;
    write(model, layout).map_err(ConvertError::from_encode)
}

/// Serialize a model to a JSON string.
pub fn to_text<T: Serialize + ?Sized>(model: &T, layout: Layout) -> Result<String> {
    let bytes = to_bytes(model, layout)?;
    Ok(String::from_utf8(bytes)?)
}

/// Convert a model to a dynamic `serde_json::Value` tree.
pub fn to_object<T: Serialize + ?Sized>(model: &T) -> Result<Value> {
    let bytes = to_bytes(model, Layout::Compact)?;
    bytes_to_object(&bytes)
}

/// Deserialize JSON bytes into a typed model.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(ConvertError::from_decode)
}

/// Deserialize a JSON string into a typed model.
pub fn from_text<T: DeserializeOwned>(text: &str) -> Result<T> {
    from_bytes(text.as_bytes())
}

/// Deserialize a dynamic object into a typed model.
pub fn from_object<T, O>(object: &O) -> Result<T>
where
    T: DeserializeOwned,
    O: Serialize + ?Sized,
{
    let value = validate_object(object)?;
    serde_json::from_value(value).map_err(ConvertError::from_decode)
}

/// Check that `object` is a legal JSON container and return it as a `Value`.
///
/// The top level must be an object or an array, map keys must be strings
/// (integer and boolean keys are not stringified) and floats must be finite.
pub fn validate_object<O: Serialize + ?Sized>(object: &O) -> Result<Value> {
    guard::check_object(object).map_err(|e| ConvertError::InvalidObject(e.to_string()))?;
    let value =
        serde_json::to_value(object).map_err(|e| ConvertError::InvalidObject(e.to_string()))?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(ConvertError::InvalidObject(format!(
            "top-level {} is not an object or array",
            describe(&other)
        ))),
    }
}

/// Serialize a dynamic object to UTF-8 JSON bytes.
pub fn object_to_bytes<O: Serialize + ?Sized>(object: &O, layout: Layout) -> Result<Vec<u8>> {
    let value = validate_object(object)?;
    write(&value, layout).map_err(|e| ConvertError::InvalidObject(e.to_string()))
}

/// Serialize a dynamic object to a JSON string.
pub fn object_to_text<O: Serialize + ?Sized>(object: &O, layout: Layout) -> Result<String> {
    let bytes = object_to_bytes(object, layout)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode a JSON string as UTF-8 bytes. Rust strings are always valid UTF-8.
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Parse a JSON string into a dynamic object.
pub fn text_to_object(text: &str) -> Result<Value> {
    bytes_to_object(text.as_bytes())
}

/// Parse JSON bytes into a dynamic object.
pub fn bytes_to_object(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| ConvertError::Decoding(e.to_string()))
}

/// Decode UTF-8 bytes into a string.
pub fn bytes_to_text(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}
