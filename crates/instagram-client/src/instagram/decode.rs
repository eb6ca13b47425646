use serde::de::{self, DeserializeOwned, Unexpected};
use serde_json::Value;

use super::error::DecodeError;

/// Decodes a JSON body into a fresh `T`
///
/// Leniency comes from `T` itself: the response types default missing fields
/// and ignore unknown ones. Invalid JSON or a structural mismatch (array where
/// an object is expected, string where a number is expected) is a
/// `DecodeError` naming `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    serde_json::from_str(body).map_err(decode_error::<T>)
}

/// Decodes a response envelope, which must be a JSON object
///
/// Derived structs also accept a JSON array as a positional sequence, and
/// with defaulted fields `[]` would quietly decode to an empty value. This
/// rejects any top-level value that is not an object.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_str(body).map_err(decode_error::<T>)?;

    if !value.is_object() {
        return Err(decode_error::<T>(de::Error::invalid_type(
            unexpected(&value),
            &"a JSON object",
        )));
    }

    serde_json::from_value(value).map_err(decode_error::<T>)
}

fn decode_error<T>(source: serde_json::Error) -> DecodeError {
    DecodeError {
        type_name: short_type_name::<T>(),
        source,
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// `std::any::type_name` without the module path
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
