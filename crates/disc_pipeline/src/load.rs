//! LOAD stage: local config asset → disc_io loader → compiled engine.

#![forbid(unsafe_code)]

use std::path::Path;

use disc_io::loader;

use crate::{EngineError, ScoringEngine};

/// Read, schema-check, fingerprint and compile the asset at `path`.
pub fn engine_from_path(path: &Path) -> Result<ScoringEngine, EngineError> {
    let cfg = loader::load_config(path)?;
    ScoringEngine::from_loaded(cfg)
}

/// Same as `engine_from_path` for an in-memory document.
pub fn engine_from_str(json: &str) -> Result<ScoringEngine, EngineError> {
    let cfg = loader::load_config_from_str(json)?;
    ScoringEngine::from_loaded(cfg)
}
