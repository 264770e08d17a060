//! BUILD_RESULT: compose the externally visible score from prior stages.
//!
//! Deterministic assembly only. Canonical serialization is delegated to
//! `disc_io::canonical_json` (sorted keys, compact, no trailing newline).

use serde::Serialize;

use disc_algo::AxisPercentages;
use disc_io::{canonical_json, IoError};

use crate::label::ProfileCode;

/// The engine's only output for one answer set.
///
/// JSON: `{"natural":{"D":..,"I":..,"S":..,"C":..},"response":{..},"profile_code":"DI"}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub natural: AxisPercentages,
    pub response: AxisPercentages,
    pub profile_code: ProfileCode,
}

impl ScoreResult {
    pub fn to_json_value(&self) -> Result<serde_json::Value, IoError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Canonical JSON text; byte-identical for identical results.
    pub fn to_canonical_json(&self) -> Result<String, IoError> {
        let bytes = canonical_json::to_canonical_bytes(self)?;
        String::from_utf8(bytes).map_err(|e| IoError::Hash(e.to_string()))
    }
}

/// Result plus the configuration it was computed under, for audit trails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub config_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_sha256: Option<String>,
    pub result: ScoreResult,
}

impl ScoreReport {
    pub fn to_canonical_json(&self) -> Result<String, IoError> {
        let bytes = canonical_json::to_canonical_bytes(self)?;
        String::from_utf8(bytes).map_err(|e| IoError::Hash(e.to_string()))
    }
}
