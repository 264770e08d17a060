//! Axis accumulation (deterministic, exact).
//!
//! Every selection adds `primary_weight` to its primary axis and
//! `secondary_weight` to its secondary axis. Exactly two distinct axes per
//! selection; a compiled style guarantees primary ≠ secondary.
//!
//! Duplicate statement ids are each counted. Input-shape policing is the
//! caller's job (see `disc_pipeline::validate`).

use disc_core::{Axis, AxisMap, Ratio, Selection};

use crate::{style::CompiledStyle, AlgoError};

/// Weighted per-axis counts before scaling.
pub type RawAxisTotals = AxisMap<Ratio>;

/// One weighted increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub axis: Axis,
    pub weight: Ratio,
}

/// The two increments a selection produces: `[primary, secondary]`.
pub fn contributions(sel: &Selection, style: &CompiledStyle) -> Result<[Contribution; 2], AlgoError> {
    let m = style.mapping(sel.statement_id).ok_or(AlgoError::UnmappedStatement {
        style: style.kind(),
        statement_id: sel.statement_id,
    })?;
    Ok([
        Contribution { axis: m.primary, weight: m.primary_weight },
        Contribution { axis: m.secondary, weight: m.secondary_weight },
    ])
}

/// Sum contributions of `present` (already filtered for the style's polarity).
pub fn accumulate(present: &[Selection], style: &CompiledStyle) -> Result<RawAxisTotals, AlgoError> {
    let mut totals = RawAxisTotals::splat(Ratio::ZERO);
    for sel in present {
        for c in contributions(sel, style)? {
            totals[c.axis] = totals[c.axis]
                .checked_add(c.weight)
                .ok_or(AlgoError::Overflow { style: style.kind() })?;
        }
    }
    Ok(totals)
}
