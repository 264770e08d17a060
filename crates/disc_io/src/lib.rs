//! crates/disc_io/src/lib.rs
//! Configuration I/O for the scoring engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Offline only: paths that look like URLs are rejected before touching the filesystem.
//! - Details live in submodules; a small prelude re-exports the stable surface.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for disc_io (used by canonical_json/hasher/schema/loader).
#[derive(Debug, Error)]
pub enum IoError {
    /// Path rejected before any read (URL, not a file, …).
    #[error("path error: {0}")]
    Path(String),

    /// Filesystem read failures.
    #[error("read error: {0}")]
    Read(String),

    /// JSON parse/deserialize errors with a JSON Pointer (root when unknown).
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures (first error, pointer included in the message).
    #[error("schema error: {0}")]
    Schema(String),

    /// Input exceeds a configured size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Canonicalization/hashing failures.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod schema;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, to_canonical_json_bytes};
    pub use crate::hasher::{sha256_canonical, sha256_hex};
    pub use crate::loader::{load_config, load_config_from_str, LoadedConfig, MAX_CONFIG_BYTES};
}
