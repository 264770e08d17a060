// crates/disc_algo/src/lib.rs
#![forbid(unsafe_code)]

use thiserror::Error;

// Core types re-exported for callers that only depend on this crate.
pub use disc_core::{
    variables::StyleKind, Axis, AxisMap, CoreError, Percent, Polarity, Ratio, Selection, StatementId,
};

// ----------------------------- Errors ------------------------------------------------

/// Configuration integrity errors. Raised while compiling a style, never while scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{style}: axes must list D, I, S, C exactly once")]
    AxesNotPermutation { style: StyleKind },

    #[error("{style}: statement id {statement_id} is outside 1..=96")]
    StatementOutOfRange { style: StyleKind, statement_id: StatementId },

    #[error("{style}: statement id {statement_id} is mapped more than once")]
    DuplicateStatement { style: StyleKind, statement_id: StatementId },

    #[error("{style}: statement id {statement_id} has no mapping row")]
    MissingStatement { style: StyleKind, statement_id: StatementId },

    #[error("{style}: statement id {statement_id} uses {axis} as both primary and secondary axis")]
    SameAxis { style: StyleKind, statement_id: StatementId, axis: Axis },

    #[error("{style}: statement id {statement_id} has a negative weight")]
    NegativeWeight { style: StyleKind, statement_id: StatementId },

    #[error("{style}: invalid number for {field}: {source}")]
    InvalidNumber { style: StyleKind, field: String, source: CoreError },

    #[error("{style}: missing denominator for axis {axis} under per-axis scaling")]
    MissingDenominator { style: StyleKind, axis: Axis },

    #[error("{style}: denominator for axis {axis} must be positive")]
    NonPositiveDenominator { style: StyleKind, axis: Axis },

    #[error("{style}: rounding decimals {decimals} exceeds maximum {max}")]
    DecimalsOutOfRange { style: StyleKind, decimals: u32, max: u32 },

    #[error("{style}: clamp min is greater than clamp max")]
    ClampInverted { style: StyleKind },

    #[error("{style}: clamp bounds must be exact at {decimals} decimals when rounding follows the clamp")]
    ClampNotRepresentable { style: StyleKind, decimals: u32 },

    #[error("{style}: configured values overflow exact arithmetic")]
    ArithmeticOverflow { style: StyleKind },

    #[error("tie-break priority must list D, I, S, C exactly once")]
    PriorityNotPermutation,

    #[error("eligibility threshold must lie within 0..=100")]
    EligibilityThresholdOutOfRange,

    #[error("invalid eligibility threshold: {0}")]
    EligibilityThresholdInvalid(CoreError),
}

/// Scoring-time failures. Unreachable for validated input and a compiled style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgoError {
    #[error("{style}: statement id {statement_id} has no mapping")]
    UnmappedStatement { style: StyleKind, statement_id: StatementId },

    #[error("{style}: exact arithmetic overflow while scoring")]
    Overflow { style: StyleKind },
}

// ----------------------------- Components --------------------------------------------

pub mod style;
pub mod presence;
pub mod accumulate;
pub mod scaling;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use style::{Clamp, CompiledMapping, CompiledRounding, CompiledStyle, Scaling};
pub use presence::{extract_presence, iter_presence};
pub use accumulate::{accumulate, contributions, Contribution, RawAxisTotals};
pub use scaling::{apply_clamp, apply_rounding, scale_raw, to_percentages, AxisPercentages};
