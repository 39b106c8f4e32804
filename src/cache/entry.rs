//! Cache Entry Module
//!
//! Defines cached payloads and the per-entry metadata used for expiration
//! and size accounting.

use bytes::Bytes;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::cache::ResourceType;

/// Size charged for a structured payload whose serialization fails.
pub const SERIALIZATION_FALLBACK_SIZE: u64 = 1024;

/// Size charged for scalar payloads (numbers, booleans).
pub const SCALAR_FALLBACK_SIZE: u64 = 8;

// == Blob Handle ==
/// Reference to binary data held in memory.
///
/// Cloning the handle shares the underlying buffer rather than copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHandle {
    id: String,
    content_type: Option<String>,
    data: Bytes,
}

impl BlobHandle {
    pub fn new(id: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            id: id.into(),
            content_type,
            data,
        }
    }

    /// Opaque identifier display code can refer to.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Shared view of the blob bytes.
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Serialize for BlobHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BlobHandle", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("content_type", &self.content_type)?;
        state.serialize_field("size", &self.data.len())?;
        state.end()
    }
}

// == Payload ==
/// Decoded representation of a cached resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Binary resource such as an image
    Binary(BlobHandle),
    /// Parsed JSON document
    Json(Value),
    /// Any other resource decoded as text
    Text(String),
}

impl Payload {
    // == Estimate Size ==
    /// Estimates the storage cost of the payload in bytes.
    ///
    /// - binary: its byte length
    /// - text: two bytes per UTF-16 code unit
    /// - structured JSON: length of its serialized form
    /// - scalar JSON values: a fixed small estimate
    pub fn estimated_size(&self) -> u64 {
        match self {
            Payload::Binary(blob) => blob.len() as u64,
            Payload::Text(text) => utf16_size(text),
            Payload::Json(Value::String(text)) => utf16_size(text),
            Payload::Json(Value::Number(_)) | Payload::Json(Value::Bool(_)) => {
                SCALAR_FALLBACK_SIZE
            }
            Payload::Json(value) => serde_json::to_vec(value)
                .map(|encoded| encoded.len() as u64)
                .unwrap_or(SERIALIZATION_FALLBACK_SIZE),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&BlobHandle> {
        match self {
            Payload::Binary(blob) => Some(blob),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<BlobHandle> for Payload {
    fn from(blob: BlobHandle) -> Self {
        Payload::Binary(blob)
    }
}

fn utf16_size(text: &str) -> u64 {
    text.encode_utf16().count() as u64 * 2
}

// == Cache Entry ==
/// A single cached resource with its metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload
    pub payload: Payload,
    /// Classification used to resolve the TTL
    pub resource_type: ResourceType,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Bytes charged against the cache capacity
    pub size_bytes: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry created at `now` that lives for `ttl_ms`.
    pub fn new(
        payload: Payload,
        resource_type: ResourceType,
        size_bytes: u64,
        now: u64,
        ttl_ms: u64,
    ) -> Self {
        Self {
            payload,
            resource_type,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            size_bytes,
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its expiration time.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_expiration_boundary() {
        let entry = CacheEntry::new(Payload::from("v"), ResourceType::Other, 2, 1_000, 500);

        assert_eq!(entry.expires_at, 1_500);
        assert!(!entry.is_expired_at(1_499));
        assert!(entry.is_expired_at(1_500));
        assert_eq!(entry.ttl_remaining_ms(1_200), 300);
        assert_eq!(entry.ttl_remaining_ms(2_000), 0);
    }

    #[test]
    fn test_entry_ttl_saturates() {
        let entry = CacheEntry::new(Payload::from("v"), ResourceType::Other, 2, u64::MAX - 1, 10);
        assert_eq!(entry.expires_at, u64::MAX);
    }

    #[test]
    fn test_text_size_is_utf16_doubled() {
        assert_eq!(Payload::from("hello").estimated_size(), 10);
        // One astral character is two UTF-16 code units
        assert_eq!(Payload::from("😀").estimated_size(), 4);
        assert_eq!(Payload::from("").estimated_size(), 0);
    }

    #[test]
    fn test_binary_size_is_byte_length() {
        let blob = BlobHandle::new("blob:1", None, Bytes::from(vec![0u8; 300]));
        assert_eq!(Payload::from(blob).estimated_size(), 300);
    }

    #[test]
    fn test_json_size_is_serialized_length() {
        let value = json!({"a": 1});
        assert_eq!(Payload::from(value).estimated_size(), r#"{"a":1}"#.len() as u64);
        assert_eq!(Payload::from(json!([1, 2])).estimated_size(), 5);
        assert_eq!(Payload::from(Value::Null).estimated_size(), 4);
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(Payload::from(json!(3.5)).estimated_size(), SCALAR_FALLBACK_SIZE);
        assert_eq!(Payload::from(json!(true)).estimated_size(), SCALAR_FALLBACK_SIZE);
        assert_eq!(Payload::from(json!("abc")).estimated_size(), 6);
    }

    #[test]
    fn test_blob_clone_shares_buffer() {
        let blob = BlobHandle::new("blob:2", Some("image/png".into()), Bytes::from_static(b"png"));
        let copy = blob.clone();
        assert_eq!(blob.bytes().as_ptr(), copy.bytes().as_ptr());
        assert_eq!(copy.content_type(), Some("image/png"));
    }

    #[test]
    fn test_payload_serialize() {
        let text = serde_json::to_value(Payload::from("hi")).unwrap();
        assert_eq!(text, json!({"kind": "text", "data": "hi"}));

        let blob = BlobHandle::new("blob:3", None, Bytes::from_static(b"abcd"));
        let binary = serde_json::to_value(Payload::from(blob)).unwrap();
        assert_eq!(
            binary,
            json!({"kind": "binary", "data": {"id": "blob:3", "content_type": null, "size": 4}})
        );
    }
}
