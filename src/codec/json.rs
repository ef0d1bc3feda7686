//! JSON codec using `serde_json`.
//!
//! # Example
//!
//! ```
//! use lambda_bootstrap::codec::{JsonCodec, JsonMap};
//!
//! let map: JsonMap = JsonCodec::decode_map(br#"{"id": 7, "tags": ["a"]}"#).unwrap();
//! assert_eq!(map["id"], 7);
//! ```

use serde_json::Value;

/// String-keyed JSON object with heterogeneous values.
///
/// This is the payload type of raw handlers.
pub type JsonMap = serde_json::Map<String, Value>;

/// JSON codec for structured payloads.
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized (e.g. a map with
    /// non-string keys).
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(value)
    }

    /// Decode JSON bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not valid JSON or do not match type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
        serde_json::from_slice(bytes)
    }

    /// Decode JSON bytes that must hold an object.
    ///
    /// Arrays, scalars and `null` at the top level are rejected.
    #[inline]
    pub fn decode_map(bytes: &[u8]) -> serde_json::Result<JsonMap> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Greeting {
        greeting: String,
    }

    #[test]
    fn test_encode_struct_field_names() {
        let encoded = JsonCodec::encode(&Greeting {
            greeting: "Hello, Ada".to_string(),
        })
        .unwrap();
        assert_eq!(encoded, br#"{"greeting":"Hello, Ada"}"#);
    }

    #[test]
    fn test_decode_map_heterogeneous_values() {
        let map = JsonCodec::decode_map(
            br#"{"n": 1.5, "s": "x", "b": true, "nested": {"k": [1, null]}, "z": null}"#,
        )
        .unwrap();

        assert_eq!(map["n"], 1.5);
        assert_eq!(map["s"], "x");
        assert_eq!(map["b"], true);
        assert!(map["nested"]["k"].is_array());
        assert!(map["z"].is_null());
    }

    #[test]
    fn test_decode_map_rejects_non_object() {
        assert!(JsonCodec::decode_map(b"[1, 2, 3]").is_err());
        assert!(JsonCodec::decode_map(b"\"text\"").is_err());
        assert!(JsonCodec::decode_map(b"null").is_err());
    }

    #[test]
    fn test_decode_type_mismatch() {
        let result: serde_json::Result<Greeting> = JsonCodec::decode(br#"{"greeting": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_malformed() {
        let result: serde_json::Result<Value> = JsonCodec::decode(b"{not json");
        assert!(result.unwrap_err().is_syntax());
    }
}
