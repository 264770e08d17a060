//! Scaling & rounding pipeline: raw totals → display percentages.
//!
//! Order of operations:
//! - `applied_after = scaling`: scale → round → clamp
//! - `applied_after = clamp`:   scale → clamp → round
//!
//! Everything is exact; the only float conversion happens when a `Percent` is
//! serialized.

use disc_core::{
    variables::AppliedAfter,
    AxisMap, Percent, Ratio,
};

use crate::{
    accumulate::RawAxisTotals,
    style::{Clamp, CompiledRounding, CompiledStyle, Scaling},
    AlgoError,
};

/// Per-axis display percentages of one style.
pub type AxisPercentages = AxisMap<Percent>;

/// Step 1. A zero sum under `NormalizeTo100` yields all zeros.
pub fn scale_raw(raw: &RawAxisTotals, scaling: &Scaling) -> Option<AxisMap<Ratio>> {
    match scaling {
        Scaling::PerAxisIndependent(den) => {
            raw.try_map(|axis, v| {
                v.checked_div(den[axis])
                    .and_then(|x| x.checked_mul(Ratio::ONE_HUNDRED))
                    .ok_or(())
            })
            .ok()
        }
        Scaling::NormalizeTo100 => {
            let sum = raw.iter().try_fold(Ratio::ZERO, |acc, (_, v)| acc.checked_add(*v))?;
            if sum.is_zero() {
                return Some(AxisMap::splat(Ratio::ZERO));
            }
            raw.try_map(|_, v| {
                v.checked_mul(Ratio::ONE_HUNDRED)
                    .and_then(|x| x.checked_div(sum))
                    .ok_or(())
            })
            .ok()
        }
    }
}

/// Step 2.
pub fn apply_rounding(values: &AxisMap<Ratio>, rounding: &CompiledRounding) -> Option<AxisMap<Ratio>> {
    values
        .try_map(|_, v| v.round_to(rounding.decimals, rounding.function).ok_or(()))
        .ok()
}

/// Step 3. Each axis independently.
pub fn apply_clamp(values: &AxisMap<Ratio>, clamp: Option<&Clamp>) -> AxisMap<Ratio> {
    match clamp {
        Some(c) => values.map(|_, v| v.clamp_to(c.min, c.max)),
        None => *values,
    }
}

/// Full pipeline for one style.
pub fn to_percentages(raw: &RawAxisTotals, style: &CompiledStyle) -> Result<AxisPercentages, AlgoError> {
    let overflow = || AlgoError::Overflow { style: style.kind() };
    let rounding = style.rounding();

    let scaled = scale_raw(raw, style.scaling()).ok_or_else(overflow)?;
    let finished = match rounding.applied_after {
        AppliedAfter::Scaling => {
            let rounded = apply_rounding(&scaled, rounding).ok_or_else(overflow)?;
            apply_clamp(&rounded, style.clamp())
        }
        AppliedAfter::Clamp => {
            let clamped = apply_clamp(&scaled, style.clamp());
            apply_rounding(&clamped, rounding).ok_or_else(overflow)?
        }
    };
    Ok(finished.map(|_, v| Percent::from_ratio(*v)))
}
