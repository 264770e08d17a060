//! disc_pipeline: deterministic scoring surface (validate → tabulate → label → build).
//!
//! A `ScoringEngine` compiles both style configurations once and is then shared
//! read-only by every caller. Scoring holds no state across calls.

#![forbid(unsafe_code)]

use thiserror::Error;
use tracing::{debug, info};

use disc_algo::{AlgoError, CompiledStyle, ConfigError};
use disc_core::{
    variables::{ScoringConfigDoc, StyleKind},
    AxisPriority, Ratio, Selection,
};
use disc_io::{loader::LoadedConfig, IoError};

pub mod build_result;
pub mod label;
pub mod load;
pub mod tabulate;
pub mod validate;

pub use build_result::{ScoreReport, ScoreResult};
pub use label::{rank_axes, resolve_profile_code, ProfileCode};
pub use load::{engine_from_path, engine_from_str};
pub use tabulate::{tabulate_style, StyleTabulation};
pub use validate::{validate_selections, InputError};

/// Single error surface for engine construction and scoring.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// Unreachable for validated input against a compiled configuration.
    #[error("scoring error: {0}")]
    Algo(#[from] AlgoError),
}

// ---------------------------- Engine ----------------------------

/// Compiled, immutable scoring configuration.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    natural: CompiledStyle,
    response: CompiledStyle,
    priority: AxisPriority,
    threshold: Ratio,
    version: String,
    config_sha256: Option<String>,
}

impl ScoringEngine {
    /// Compile both styles and the resolver settings. All configuration
    /// integrity errors surface here, never at scoring time.
    pub fn new(doc: &ScoringConfigDoc) -> Result<Self, EngineError> {
        let natural = CompiledStyle::compile(StyleKind::Natural, &doc.styles.natural)?;
        let response = CompiledStyle::compile(StyleKind::Response, &doc.styles.response)?;
        let priority =
            AxisPriority::new(&doc.tie_break_priority).map_err(|_| ConfigError::PriorityNotPermutation)?;

        let threshold =
            Ratio::from_f64_decimal(doc.eligibility_threshold).map_err(ConfigError::EligibilityThresholdInvalid)?;
        if threshold.is_negative() || threshold > Ratio::ONE_HUNDRED {
            return Err(ConfigError::EligibilityThresholdOutOfRange.into());
        }

        let engine = ScoringEngine {
            natural,
            response,
            priority,
            threshold,
            version: doc.version.clone(),
            config_sha256: None,
        };
        info!(
            version = %engine.version,
            natural_polarity = %engine.natural.polarity(),
            response_polarity = %engine.response.polarity(),
            "scoring engine built"
        );
        Ok(engine)
    }

    /// Build from a loaded asset, keeping its fingerprint for reports.
    pub fn from_loaded(cfg: LoadedConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new(&cfg.doc)?;
        info!(config_sha256 = %cfg.config_sha256, "scoring config fingerprint");
        engine.config_sha256 = Some(cfg.config_sha256);
        Ok(engine)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn config_sha256(&self) -> Option<&str> {
        self.config_sha256.as_deref()
    }

    pub fn priority(&self) -> &AxisPriority {
        &self.priority
    }

    pub fn threshold(&self) -> Ratio {
        self.threshold
    }

    pub fn style(&self, kind: StyleKind) -> &CompiledStyle {
        match kind {
            StyleKind::Natural => &self.natural,
            StyleKind::Response => &self.response,
        }
    }

    /// Validate → tabulate both styles → resolve the code from natural percentages.
    pub fn score(&self, selections: &[Selection]) -> Result<ScoreResult, EngineError> {
        validate_selections(selections)?;
        let natural = tabulate_style(selections, &self.natural)?;
        let response = tabulate_style(selections, &self.response)?;
        Ok(self.finish(natural, response))
    }

    /// Same result as `score`, with the two styles on scoped threads.
    pub fn score_concurrent(&self, selections: &[Selection]) -> Result<ScoreResult, EngineError> {
        validate_selections(selections)?;
        let (natural, response) = std::thread::scope(|s| {
            let response = s.spawn(|| tabulate_style(selections, &self.response));
            let natural = tabulate_style(selections, &self.natural);
            (natural, response.join())
        });
        let response = match response {
            Ok(r) => r?,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        Ok(self.finish(natural?, response))
    }

    /// One style's tabulation (raw totals and percentages), for diagnostics.
    pub fn score_style(&self, kind: StyleKind, selections: &[Selection]) -> Result<StyleTabulation, EngineError> {
        validate_selections(selections)?;
        Ok(tabulate_style(selections, self.style(kind))?)
    }

    /// `score` wrapped with the configuration version and fingerprint.
    pub fn report(&self, selections: &[Selection]) -> Result<ScoreReport, EngineError> {
        Ok(ScoreReport {
            config_version: self.version.clone(),
            config_sha256: self.config_sha256.clone(),
            result: self.score(selections)?,
        })
    }

    fn finish(&self, natural: StyleTabulation, response: StyleTabulation) -> ScoreResult {
        let profile_code = resolve_profile_code(&natural.percentages, &self.priority, self.threshold);
        debug!(
            natural_considered = natural.considered,
            response_considered = response.considered,
            profile_code = %profile_code,
            "scored"
        );
        ScoreResult { natural: natural.percentages, response: response.percentages, profile_code }
    }
}
