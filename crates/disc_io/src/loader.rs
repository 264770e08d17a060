//! Loader: read the local scoring configuration asset, validate it against the
//! embedded schema, deserialize it into `ScoringConfigDoc`, and fingerprint it.
//! No network I/O.

#![forbid(unsafe_code)]

use std::{fs::File, io::Read, path::Path};

use disc_core::variables::{ScoringConfigDoc, StyleKind};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{hasher, looks_like_url_strict, schema, IoError};

/// Upper bound on the asset size. A 96-row table per style is a few tens of KiB.
pub const MAX_CONFIG_BYTES: u64 = 4 * 1024 * 1024;

/// Validated configuration plus its SHA-256 fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub doc: ScoringConfigDoc,
    /// Lowercase hex SHA-256 over the canonical JSON of `doc` (defaults applied).
    pub config_sha256: String,
}

// ----------------------------- Entry points -----------------------------

/// Load from a local path: size limit → parse → schema → deserialize → fingerprint.
pub fn load_config(path: &Path) -> Result<LoadedConfig, IoError> {
    let v = read_json_value_with_limits(path)?;
    debug!(path = %path.display(), "scoring config read");
    load_config_from_value(v)
}

/// Load from an in-memory JSON string (same limits and checks as a file).
pub fn load_config_from_str(s: &str) -> Result<LoadedConfig, IoError> {
    if s.len() as u64 > MAX_CONFIG_BYTES {
        return Err(IoError::Limit(format!("config is {} bytes (max {MAX_CONFIG_BYTES})", s.len())));
    }
    let v: Value = serde_json::from_str(s)?;
    load_config_from_value(v)
}

/// Validate and deserialize an already-parsed document.
pub fn load_config_from_value(v: Value) -> Result<LoadedConfig, IoError> {
    schema::validate_value(&v)?;
    warn_on_defaults(&v);

    let doc: ScoringConfigDoc =
        serde_json::from_value(v).map_err(|e| IoError::Json { pointer: "/".into(), msg: e.to_string() })?;
    let config_sha256 = hasher::sha256_canonical(&doc)?;
    Ok(LoadedConfig { doc, config_sha256 })
}

// ----------------------------- Helpers -----------------------------

/// Read a JSON file with an upper bound on its size. Rejects URL-like paths.
pub fn read_json_value_with_limits(path: &Path) -> Result<Value, IoError> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Path(format!("offline loader refuses URL-like path: {shown}")));
    }
    let f = File::open(path).map_err(|e| IoError::Read(format!("{shown}: {e}")))?;
    let meta = f.metadata()?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("{shown}: not a regular file")));
    }
    if meta.len() > MAX_CONFIG_BYTES {
        return Err(IoError::Limit(format!("{shown} is {} bytes (max {MAX_CONFIG_BYTES})", meta.len())));
    }

    // Bounded read even if the file grows after the metadata check.
    let mut buf = Vec::with_capacity(meta.len() as usize);
    f.take(MAX_CONFIG_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_CONFIG_BYTES {
        return Err(IoError::Limit(format!("{shown} exceeds {MAX_CONFIG_BYTES} bytes")));
    }
    let v: Value = serde_json::from_slice(&buf)?;
    Ok(v)
}

/// Optional sections that the deserializer will fill with defaults.
fn warn_on_defaults(v: &Value) {
    if v.get("tie_break_priority").is_none() {
        warn!("tie_break_priority absent; using default D, I, C, S");
    }
    if v.get("eligibility_threshold").is_none() {
        warn!("eligibility_threshold absent; using default 50");
    }
    for kind in StyleKind::ALL {
        let Some(style) = v.pointer(&format!("/styles/{}", kind.as_str())) else { continue };
        if style.get("clamp").is_none() {
            debug!(style = %kind, "no clamp configured");
        }
        if style.pointer("/rounding/applied_after").is_none() {
            warn!(style = %kind, "rounding.applied_after absent; using default \"scaling\"");
        }
        let normalized = style.get("scaling_mode").and_then(Value::as_str) == Some("normalize_to_100");
        if normalized && style.get("denominators").is_some() {
            debug!(style = %kind, "denominators ignored under normalize_to_100");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STYLE: &str = r#"{
        "axes": ["D","I","S","C"],
        "selection_polarity": "least",
        "denominators": {"D": 24, "I": 24, "S": 24, "C": 24},
        "scaling_mode": "per_axis_independent",
        "rounding": {"function": "bankers", "decimals": 1, "applied_after": "scaling"},
        "mappings": [{"statement_id": 1, "primary_axis": "D", "secondary_axis": "I"}]
    }"#;

    fn doc_text() -> String {
        format!(r#"{{"version":"t","styles":{{"natural":{STYLE},"response":{STYLE}}}}}"#)
    }

    #[test]
    fn string_and_file_loads_agree() {
        let from_str = load_config_from_str(&doc_text()).unwrap();

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(doc_text().as_bytes()).unwrap();
        let from_file = load_config(f.path()).unwrap();

        assert_eq!(from_str, from_file);
        assert_eq!(from_file.config_sha256.len(), 64);
        assert_eq!(from_file.doc.eligibility_threshold, 50.0);
    }

    #[test]
    fn fingerprint_ignores_whitespace_and_key_order() {
        let a = load_config_from_str(&doc_text()).unwrap();
        let reordered = format!(r#"{{ "styles": {{"response":{STYLE}, "natural":{STYLE}}},   "version": "t" }}"#);
        let b = load_config_from_str(&reordered).unwrap();
        assert_eq!(a.config_sha256, b.config_sha256);

        let changed = doc_text().replace(r#""version":"t""#, r#""version":"u""#);
        assert_ne!(a.config_sha256, load_config_from_str(&changed).unwrap().config_sha256);
    }

    #[test]
    fn urls_and_directories_are_refused() {
        assert!(matches!(load_config(Path::new("https://example.org/c.json")), Err(IoError::Path(_))));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(dir.path()), Err(IoError::Path(_))));
        assert!(matches!(load_config(&dir.path().join("missing.json")), Err(IoError::Read(_))));
    }

    #[test]
    fn oversize_and_malformed_inputs() {
        let big = " ".repeat(MAX_CONFIG_BYTES as usize + 1);
        assert!(matches!(load_config_from_str(&big), Err(IoError::Limit(_))));
        assert!(matches!(load_config_from_str("{not json"), Err(IoError::Json { .. })));
        assert!(matches!(load_config_from_str(r#"{"version":"t"}"#), Err(IoError::Schema(_))));
    }

    #[test]
    fn zero_denominators_only_matter_under_independent_scaling() {
        let zeroed = STYLE.replace(r#""D": 24, "I": 24"#, r#""D": 0, "I": 24"#);
        let normalized = zeroed.replace("per_axis_independent", "normalize_to_100");

        let ok = format!(r#"{{"version":"t","styles":{{"natural":{STYLE},"response":{normalized}}}}}"#);
        let cfg = load_config_from_str(&ok).unwrap();
        assert_eq!(cfg.doc.styles.response.denominators.get(&disc_core::Axis::D), Some(&0.0));

        let bad = format!(r#"{{"version":"t","styles":{{"natural":{zeroed},"response":{STYLE}}}}}"#);
        match load_config_from_str(&bad) {
            Err(IoError::Schema(msg)) => assert!(msg.contains("/styles/natural/denominators/D"), "{msg}"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
