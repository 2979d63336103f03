//! Argument decoding for tool and prompt calls.
//!
//! Callers hand us an untyped JSON object; each operation declares a params
//! struct and decoding into it is the validation step. Nothing here touches
//! the network.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::DispatchError;
use crate::client::validate_path;

pub type Arguments = Map<String, Value>;

pub fn parse<T: DeserializeOwned>(args: Option<Arguments>) -> Result<T, DispatchError> {
    let value = Value::Object(args.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| DispatchError::InvalidArgument(e.to_string()))
}

/// Reject note paths that would resolve outside the vault resource.
pub fn note_path(path: &str) -> Result<(), DispatchError> {
    validate_path(path).map_err(|e| DispatchError::InvalidArgument(e.to_string()))
}

/// Build an argument map from `key=value` pairs (CLI input).
pub fn from_pairs<I, S>(pairs: I) -> Result<Arguments, DispatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = Arguments::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            DispatchError::InvalidArgument(format!("expected key=value, got '{}'", pair))
        })?;
        map.insert(key.trim().to_string(), Value::String(value.to_string()));
    }
    Ok(map)
}
