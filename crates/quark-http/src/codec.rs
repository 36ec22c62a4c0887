//! Pluggable body encoding.
//!
//! A [`Codec`] turns handler return values into response bytes and request
//! bodies into values. It works on [`serde_json::Value`] so it stays
//! object-safe and can be shared as `Arc<dyn Codec>`; the generic helpers
//! [`encode`] and [`decode`] bridge to typed values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use quark_core::{QuarkError, QuarkResult};

/// Encodes and decodes request and response bodies.
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// The `Content-Type` of encoded bodies.
    fn content_type(&self) -> &'static str;

    /// Encodes a value into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::SerializationError`] if the value cannot be
    /// represented.
    fn encode(&self, value: &serde_json::Value) -> QuarkResult<Vec<u8>>;

    /// Decodes bytes into a value.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::SerializationError`] if the bytes are malformed.
    fn decode(&self, bytes: &[u8]) -> QuarkResult<serde_json::Value>;
}

/// Compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, value: &serde_json::Value) -> QuarkResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| QuarkError::SerializationError(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> QuarkResult<serde_json::Value> {
        serde_json::from_slice(bytes).map_err(|e| QuarkError::SerializationError(e.to_string()))
    }
}

/// Indented JSON, handy while debugging.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonCodec;

impl Codec for PrettyJsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, value: &serde_json::Value) -> QuarkResult<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|e| QuarkError::SerializationError(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> QuarkResult<serde_json::Value> {
        JsonCodec.decode(bytes)
    }
}

/// Encodes a typed value with `codec`.
///
/// # Errors
///
/// Returns [`QuarkError::InternalServerError`]: a response that cannot be
/// encoded is a server-side fault.
pub fn encode<T: Serialize + ?Sized>(codec: &dyn Codec, value: &T) -> QuarkResult<Vec<u8>> {
    serde_json::to_value(value)
        .map_err(|e| QuarkError::InternalServerError(e.to_string()))
        .and_then(|v| codec.encode(&v))
        .map_err(|e| match e {
            QuarkError::SerializationError(msg) => QuarkError::InternalServerError(msg),
            other => other,
        })
}

/// Decodes a typed value with `codec`.
///
/// # Errors
///
/// Returns [`QuarkError::SerializationError`] (400) if the bytes are
/// malformed or do not fit `T`.
pub fn decode<T: DeserializeOwned>(codec: &dyn Codec, bytes: &[u8]) -> QuarkResult<T> {
    let value = codec.decode(bytes)?;
    serde_json::from_value(value).map_err(|e| QuarkError::SerializationError(e.to_string()))
}
