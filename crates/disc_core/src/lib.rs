//! disc_core: Core types, domains, ordering helpers, and exact numerics.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`disc_io`, `disc_algo`, `disc_pipeline`).
//!
//! - Axes: `Axis` (D, I, S, C) and the fixed-shape `AxisMap<T>`
//! - Respondent input: `StatementId`, `Polarity`, `Selection`
//! - Tie-break ordering: `AxisPriority`
//! - Exact rational numerics and the four spreadsheet rounding functions
//! - Serde wire shapes of the scoring configuration asset

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidAxis,
        InvalidDecimal,
        PrecisionExceeded { max_fraction_digits: u32 },
        NonFiniteNumber,
        InvalidRatio,
        Overflow,
        PriorityNotPermutation,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidAxis => write!(f, "invalid axis (expected one of D, I, S, C)"),
                CoreError::InvalidDecimal => write!(f, "invalid decimal literal"),
                CoreError::PrecisionExceeded { max_fraction_digits } => {
                    write!(f, "more than {max_fraction_digits} fractional digits")
                }
                CoreError::NonFiniteNumber => write!(f, "number is not finite"),
                CoreError::InvalidRatio => write!(f, "invalid ratio (zero denominator)"),
                CoreError::Overflow => write!(f, "exact arithmetic overflow"),
                CoreError::PriorityNotPermutation => {
                    write!(f, "priority list must contain each of D, I, S, C exactly once")
                }
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod axis;
pub mod determinism;
pub mod rounding;
pub mod selection;
pub mod variables;

pub use axis::{Axis, AxisMap};
pub use determinism::AxisPriority;
pub use errors::CoreError;
pub use rounding::{Percent, Ratio, RoundingFn};
pub use selection::{Polarity, Selection, StatementId, STATEMENT_COUNT};
