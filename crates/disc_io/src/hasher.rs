//! crates/disc_io/src/hasher.rs
//!
//! SHA-256 fingerprints.
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json).
//! - Use `sha256_hex(..)` for raw bytes.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::{to_canonical_bytes, to_canonical_json_bytes};
use crate::IoError;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// SHA-256 over an already-parsed JSON value.
pub fn sha256_canonical_value(v: &Value) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_json_bytes(v)?))
}
