//! # Snapshot Digests — Canonical Bytes and SHA-256 Fingerprints
//!
//! The engine recomputes every view from the latest snapshot; any cache an
//! adapter wants to put in front of it must be keyed by snapshot content,
//! not identity. This module provides that key: a `CanonicalBytes`
//! serialization pipeline and the SHA-256 `ContentDigest` computed from it.
//!
//! ## Invariant
//!
//! `ContentDigest` can only be computed from `CanonicalBytes`, and the only
//! constructor of `CanonicalBytes` applies the full coercion pipeline
//! (float rejection, RFC 8785 key ordering). Two snapshots with equal
//! content therefore always produce equal fingerprints, regardless of map
//! iteration order or the adapter's serializer settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::CanonicalizationError;

// ─── CanonicalBytes ──────────────────────────────────────────────────

/// Bytes produced exclusively by JCS-compatible canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Float values are rejected: the data model carries only integers,
///   strings, booleans, and nulls.
/// - Serialization is RFC 8785 (JSON Canonicalization Scheme): sorted keys,
///   compact separators, deterministic byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// non-integer numbers, or `SerializationFailed` if JCS serialization
    /// fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let bytes = serde_jcs::to_vec(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject float values in a JSON tree.
///
/// Counts, versions, and scores in the data model are integers; a float
/// anywhere means an adapter serialized something it should not have, and
/// JCS number formatting edge cases would make the fingerprint unstable.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}

// ─── ContentDigest ───────────────────────────────────────────────────

/// A SHA-256 digest over canonical bytes.
///
/// Displayed as `sha256:<hex>`, suitable as an external cache key for
/// recompute results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, not raw `&[u8]` — no code path can
/// fingerprint non-canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest { bytes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_key_order_does_not_affect_bytes() {
        let a = serde_json::json!({"b": 2, "a": 1});
        let b = serde_json::json!({"a": 1, "b": 2});
        assert_eq!(
            CanonicalBytes::new(&a).unwrap(),
            CanonicalBytes::new(&b).unwrap()
        );
    }

    #[test]
    fn test_floats_rejected() {
        let v = serde_json::json!({"score": 29.5});
        assert!(matches!(
            CanonicalBytes::new(&v),
            Err(CanonicalizationError::FloatRejected(_))
        ));
    }

    #[test]
    fn test_integers_accepted() {
        let v = serde_json::json!({"score": 29, "negative": -3});
        assert!(CanonicalBytes::new(&v).is_ok());
    }

    #[test]
    fn test_digest_display_prefix() {
        let bytes = CanonicalBytes::new(&serde_json::json!({"x": 1})).unwrap();
        let digest = sha256_digest(&bytes);
        let s = digest.to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_distinct_content_distinct_digest() {
        let a = CanonicalBytes::new(&serde_json::json!({"x": 1})).unwrap();
        let b = CanonicalBytes::new(&serde_json::json!({"x": 2})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }

    proptest! {
        #[test]
        fn property_digest_is_deterministic(entries in proptest::collection::btree_map("[a-z]{1,8}", 0i64..1000, 0..8)) {
            let map: BTreeMap<String, i64> = entries;
            let first = sha256_digest(&CanonicalBytes::new(&map).unwrap());
            let second = sha256_digest(&CanonicalBytes::new(&map).unwrap());
            prop_assert_eq!(first, second);
        }
    }
}
