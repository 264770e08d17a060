//! crates/disc_pipeline/src/validate.rs
//! Input-shape validation before any computation.
//!
//! Malformed input fails loudly with the offending statement id; nothing is
//! dropped or coerced.

use std::collections::BTreeSet;

use thiserror::Error;

use disc_core::{Polarity, Selection, StatementId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("statement id {statement_id} is outside 1..=96")]
    StatementOutOfRange { statement_id: StatementId },

    #[error("statement id {statement_id} is selected as {polarity} more than once")]
    DuplicatePolarity { statement_id: StatementId, polarity: Polarity },
}

/// Every id in 1..=96; at most one MOST and one LEAST per id.
/// Errors are reported for the first offending selection in input order.
pub fn validate_selections(selections: &[Selection]) -> Result<(), InputError> {
    let mut seen: BTreeSet<(StatementId, Polarity)> = BTreeSet::new();
    for sel in selections {
        if !sel.statement_id.is_in_range() {
            return Err(InputError::StatementOutOfRange { statement_id: sel.statement_id });
        }
        if !seen.insert((sel.statement_id, sel.polarity)) {
            return Err(InputError::DuplicatePolarity { statement_id: sel.statement_id, polarity: sel.polarity });
        }
    }
    Ok(())
}
