use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

pub fn json_encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn json_encode_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a JSON object.
pub fn json_decode_to_map(str: &str) -> Result<Map<String, Value>> {
    json_decode(str)
}

/// Decode a JSON array of objects.
pub fn json_decode_to_map_array(str: &str) -> Result<Vec<Map<String, Value>>> {
    json_decode(str)
}

pub fn json_decode<T: DeserializeOwned>(str: &str) -> Result<T> {
    serde_json::from_str(str).map_err(|e| {
        warn!("JSON decode failed: {}", e);
        e.into()
    })
}
