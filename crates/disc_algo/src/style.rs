//! Statement configuration compilation.
//!
//! `CompiledStyle::compile` validates one `StyleConfigDoc` and turns it into an
//! immutable, exact-arithmetic form with an O(1) statement index. It is built
//! once per configuration load and then shared read-only by every scoring call.
//!
//! Checks (all fail with `ConfigError`, never at scoring time):
//! - `axes` is a permutation of D, I, S, C
//! - mapping ids lie in 1..=96, each exactly once; primary ≠ secondary; weights ≥ 0
//! - per-axis scaling has a positive denominator for every axis
//! - `decimals` ≤ `MAX_ROUNDING_DECIMALS`
//! - clamp `min ≤ max`, and exact at `decimals` when rounding follows the clamp
//! - the worst-case totals fit exact arithmetic

use disc_core::{
    determinism::AxisPriority,
    rounding::MAX_ROUNDING_DECIMALS,
    variables::{AppliedAfter, ScalingMode, StyleConfigDoc, StyleKind},
    Axis, AxisMap, Polarity, Ratio, RoundingFn, StatementId, STATEMENT_COUNT,
};

use crate::ConfigError;

/// One mapping row in exact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompiledMapping {
    pub primary: Axis,
    pub secondary: Axis,
    pub primary_weight: Ratio,
    pub secondary_weight: Ratio,
}

/// Step 1 of the scaling pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scaling {
    /// `raw[axis] / denominators[axis] * 100`; every denominator is positive.
    PerAxisIndependent(AxisMap<Ratio>),
    /// `raw[axis] / sum(raw) * 100`; all zero when the sum is zero.
    NormalizeTo100,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompiledRounding {
    pub function: RoundingFn,
    pub decimals: u32,
    pub applied_after: AppliedAfter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clamp {
    pub min: Ratio,
    pub max: Ratio,
}

/// A validated style configuration.
#[derive(Clone, Debug)]
pub struct CompiledStyle {
    kind: StyleKind,
    polarity: Polarity,
    /// Indexed by statement id; slot 0 is unused.
    index: Vec<Option<CompiledMapping>>,
    scaling: Scaling,
    rounding: CompiledRounding,
    clamp: Option<Clamp>,
}

impl CompiledStyle {
    pub fn compile(kind: StyleKind, doc: &StyleConfigDoc) -> Result<Self, ConfigError> {
        check_axes(kind, &doc.axes)?;
        let index = compile_index(kind, doc)?;
        let scaling = compile_scaling(kind, doc)?;

        let decimals = doc.rounding.decimals;
        if decimals > MAX_ROUNDING_DECIMALS {
            return Err(ConfigError::DecimalsOutOfRange {
                style: kind,
                decimals,
                max: MAX_ROUNDING_DECIMALS,
            });
        }
        let rounding = CompiledRounding {
            function: doc.rounding.function,
            decimals,
            applied_after: doc.rounding.applied_after,
        };
        let clamp = compile_clamp(kind, doc, &rounding)?;

        let style = CompiledStyle {
            kind,
            polarity: doc.selection_polarity,
            index,
            scaling,
            rounding,
            clamp,
        };
        style.check_arithmetic_budget()?;
        Ok(style)
    }

    #[inline]
    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    /// Which selections this style reads.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline]
    pub fn scaling(&self) -> &Scaling {
        &self.scaling
    }

    #[inline]
    pub fn rounding(&self) -> &CompiledRounding {
        &self.rounding
    }

    #[inline]
    pub fn clamp(&self) -> Option<&Clamp> {
        self.clamp.as_ref()
    }

    /// O(1) lookup; `None` for ids outside 1..=96.
    #[inline]
    pub fn mapping(&self, id: StatementId) -> Option<&CompiledMapping> {
        self.index.get(id.get() as usize).and_then(Option::as_ref)
    }

    /// Every (id, mapping) pair in id order.
    pub fn mappings(&self) -> impl Iterator<Item = (StatementId, &CompiledMapping)> + '_ {
        self.index
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_ref().map(|m| (StatementId(i as u16), m)))
    }

    /// Worst case: every statement counted once. Scaling that total (and its
    /// rounding at `decimals`) must stay inside i128.
    fn check_arithmetic_budget(&self) -> Result<(), ConfigError> {
        let overflow = ConfigError::ArithmeticOverflow { style: self.kind };

        let mut max_totals = AxisMap::splat(Ratio::ZERO);
        for (_, m) in self.mappings() {
            max_totals[m.primary] = max_totals[m.primary]
                .checked_add(m.primary_weight)
                .ok_or_else(|| overflow.clone())?;
            max_totals[m.secondary] = max_totals[m.secondary]
                .checked_add(m.secondary_weight)
                .ok_or_else(|| overflow.clone())?;
        }

        let grand_total = max_totals
            .iter()
            .try_fold(Ratio::ZERO, |acc, (_, v)| acc.checked_add(*v))
            .ok_or_else(|| overflow.clone())?;

        for axis in Axis::ALL {
            let scaled = match &self.scaling {
                Scaling::PerAxisIndependent(den) => max_totals[axis]
                    .checked_div(den[axis])
                    .and_then(|r| r.checked_mul(Ratio::ONE_HUNDRED)),
                // Bounded by 100; the product itself is the risky step.
                Scaling::NormalizeTo100 => max_totals[axis]
                    .checked_mul(Ratio::ONE_HUNDRED)
                    .and_then(|r| if grand_total.is_zero() { Some(r) } else { r.checked_div(grand_total) }),
            };
            let scaled = scaled.ok_or_else(|| overflow.clone())?;
            scaled
                .round_to(self.rounding.decimals, self.rounding.function)
                .ok_or_else(|| overflow.clone())?;
        }
        Ok(())
    }
}

// ----------------------------- Compilation helpers -----------------------------

/// The declared axis list is checked, not stored; output order is always D, I, S, C.
fn check_axes(kind: StyleKind, axes: &[Axis]) -> Result<(), ConfigError> {
    // Same permutation rule as the tie-break list.
    AxisPriority::new(axes)
        .map(|_| ())
        .map_err(|_| ConfigError::AxesNotPermutation { style: kind })
}

fn compile_index(kind: StyleKind, doc: &StyleConfigDoc) -> Result<Vec<Option<CompiledMapping>>, ConfigError> {
    let mut index: Vec<Option<CompiledMapping>> = vec![None; STATEMENT_COUNT as usize + 1];

    for row in &doc.mappings {
        let id = row.statement_id;
        if !id.is_in_range() {
            return Err(ConfigError::StatementOutOfRange { style: kind, statement_id: id });
        }
        if row.primary_axis == row.secondary_axis {
            return Err(ConfigError::SameAxis { style: kind, statement_id: id, axis: row.primary_axis });
        }
        let primary_weight = exact(kind, row.primary_weight, || format!("mapping {id} primary_weight"))?;
        let secondary_weight = exact(kind, row.secondary_weight, || format!("mapping {id} secondary_weight"))?;
        if primary_weight.is_negative() || secondary_weight.is_negative() {
            return Err(ConfigError::NegativeWeight { style: kind, statement_id: id });
        }

        let slot = &mut index[id.get() as usize];
        if slot.is_some() {
            return Err(ConfigError::DuplicateStatement { style: kind, statement_id: id });
        }
        *slot = Some(CompiledMapping {
            primary: row.primary_axis,
            secondary: row.secondary_axis,
            primary_weight,
            secondary_weight,
        });
    }

    if let Some(missing) = (1..=STATEMENT_COUNT).find(|i| index[*i as usize].is_none()) {
        return Err(ConfigError::MissingStatement { style: kind, statement_id: StatementId(missing) });
    }
    Ok(index)
}

fn compile_scaling(kind: StyleKind, doc: &StyleConfigDoc) -> Result<Scaling, ConfigError> {
    match doc.scaling_mode {
        ScalingMode::NormalizeTo100 => Ok(Scaling::NormalizeTo100),
        ScalingMode::PerAxisIndependent => {
            let dens = AxisMap::from_fn(|a| a).try_map(|axis, _| {
                let raw = *doc
                    .denominators
                    .get(&axis)
                    .ok_or(ConfigError::MissingDenominator { style: kind, axis })?;
                let den = exact(kind, raw, || format!("denominator {axis}"))?;
                if den.is_zero() || den.is_negative() {
                    return Err(ConfigError::NonPositiveDenominator { style: kind, axis });
                }
                Ok(den)
            })?;
            Ok(Scaling::PerAxisIndependent(dens))
        }
    }
}

fn compile_clamp(
    kind: StyleKind,
    doc: &StyleConfigDoc,
    rounding: &CompiledRounding,
) -> Result<Option<Clamp>, ConfigError> {
    let Some(c) = doc.clamp else { return Ok(None) };
    let min = exact(kind, c.min, || "clamp.min".to_string())?;
    let max = exact(kind, c.max, || "clamp.max".to_string())?;
    if min > max {
        return Err(ConfigError::ClampInverted { style: kind });
    }
    // Rounding after the clamp must not step outside [min, max].
    if rounding.applied_after == AppliedAfter::Clamp
        && !(min.is_exact_at(rounding.decimals) && max.is_exact_at(rounding.decimals))
    {
        return Err(ConfigError::ClampNotRepresentable { style: kind, decimals: rounding.decimals });
    }
    Ok(Some(Clamp { min, max }))
}

fn exact<F: FnOnce() -> String>(kind: StyleKind, v: f64, field: F) -> Result<Ratio, ConfigError> {
    Ratio::from_f64_decimal(v).map_err(|source| ConfigError::InvalidNumber { style: kind, field: field(), source })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use disc_core::variables::{ClampRange, RoundingSpec, StatementMapping};
    use std::collections::BTreeMap;

    /// Complete 96-row table: statement k feeds axis (k-1)%4, secondary the next axis.
    pub(crate) fn doc(polarity: Polarity, scaling_mode: ScalingMode) -> StyleConfigDoc {
        let mappings = (1..=STATEMENT_COUNT)
            .map(|k| {
                let p = ((k - 1) % 4) as usize;
                StatementMapping {
                    statement_id: StatementId(k),
                    primary_axis: Axis::ALL[p],
                    secondary_axis: Axis::ALL[(p + 1) % 4],
                    primary_weight: 1.0,
                    secondary_weight: 0.5,
                }
            })
            .collect();
        let denominators: BTreeMap<Axis, f64> = Axis::ALL.iter().map(|a| (*a, 24.0)).collect();
        StyleConfigDoc {
            axes: Axis::ALL.to_vec(),
            selection_polarity: polarity,
            denominators,
            scaling_mode,
            rounding: RoundingSpec { function: RoundingFn::Round, decimals: 0, applied_after: AppliedAfter::Scaling },
            clamp: Some(ClampRange { min: 0.0, max: 100.0 }),
            mappings,
        }
    }

    fn compile(d: &StyleConfigDoc) -> Result<CompiledStyle, ConfigError> {
        CompiledStyle::compile(StyleKind::Natural, d)
    }

    #[test]
    fn complete_table_compiles_with_o1_index() {
        let s = compile(&doc(Polarity::Least, ScalingMode::PerAxisIndependent)).unwrap();
        assert_eq!(s.mappings().count(), STATEMENT_COUNT as usize);
        let m = s.mapping(StatementId(6)).unwrap();
        assert_eq!((m.primary, m.secondary), (Axis::I, Axis::S));
        assert_eq!(m.secondary_weight, Ratio::new(1, 2).unwrap());
        assert!(s.mapping(StatementId(0)).is_none());
        assert!(s.mapping(StatementId(97)).is_none());
        assert_eq!(s.polarity(), Polarity::Least);
    }

    #[test]
    fn missing_and_duplicate_rows_are_config_errors() {
        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.mappings.retain(|m| m.statement_id != StatementId(40));
        assert_eq!(
            compile(&d).unwrap_err(),
            ConfigError::MissingStatement { style: StyleKind::Natural, statement_id: StatementId(40) }
        );

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        let dup = d.mappings[10].clone();
        d.mappings.push(dup);
        assert_eq!(
            compile(&d).unwrap_err(),
            ConfigError::DuplicateStatement { style: StyleKind::Natural, statement_id: StatementId(11) }
        );

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.mappings[0].statement_id = StatementId(97);
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::StatementOutOfRange { .. }));
    }

    #[test]
    fn same_axis_and_negative_weight_rejected() {
        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.mappings[2].secondary_axis = d.mappings[2].primary_axis;
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::SameAxis { .. }));

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.mappings[2].secondary_weight = -0.5;
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::NegativeWeight { .. }));

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.mappings[2].primary_weight = f64::INFINITY;
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn denominators_checked_only_for_independent_scaling() {
        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.denominators.insert(Axis::C, 0.0);
        assert_eq!(
            compile(&d).unwrap_err(),
            ConfigError::NonPositiveDenominator { style: StyleKind::Natural, axis: Axis::C }
        );

        d.denominators.remove(&Axis::C);
        assert_eq!(
            compile(&d).unwrap_err(),
            ConfigError::MissingDenominator { style: StyleKind::Natural, axis: Axis::C }
        );

        d.scaling_mode = ScalingMode::NormalizeTo100;
        assert_eq!(*compile(&d).unwrap().scaling(), Scaling::NormalizeTo100);
    }

    #[test]
    fn axes_must_be_a_permutation() {
        let mut d = doc(Polarity::Most, ScalingMode::NormalizeTo100);
        d.axes = vec![Axis::D, Axis::I, Axis::S, Axis::S];
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::AxesNotPermutation { .. }));
    }

    #[test]
    fn rounding_and_clamp_rules() {
        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.rounding.decimals = 10;
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::DecimalsOutOfRange { .. }));

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.clamp = Some(ClampRange { min: 60.0, max: 40.0 });
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::ClampInverted { .. }));

        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        d.rounding.applied_after = AppliedAfter::Clamp;
        d.clamp = Some(ClampRange { min: 0.0, max: 99.5 });
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::ClampNotRepresentable { .. }));

        // Same bounds are fine when rounding happens before the clamp.
        d.rounding.applied_after = AppliedAfter::Scaling;
        assert!(compile(&d).is_ok());
    }

    #[test]
    fn absurd_values_fail_arithmetic_budget() {
        let mut d = doc(Polarity::Least, ScalingMode::PerAxisIndependent);
        for m in &mut d.mappings {
            m.primary_weight = 1e30;
        }
        d.denominators.insert(Axis::D, 0.000000000001);
        d.rounding.decimals = 9;
        assert!(matches!(compile(&d).unwrap_err(), ConfigError::ArithmeticOverflow { .. }));
    }
}
