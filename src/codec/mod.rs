//! Codec module - JSON serialization for event and result payloads.
//!
//! The Runtime API carries events and results as opaque bytes. Handlers that
//! want structured data go through [`JsonCodec`].
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects,
//! so the codec is chosen at compile time by the handler adapter.
//!
//! # Example
//!
//! ```
//! use lambda_bootstrap::codec::JsonCodec;
//!
//! let encoded = JsonCodec::encode(&"hello").unwrap();
//! let decoded: String = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

mod json;

pub use json::{JsonCodec, JsonMap};
