//! crates/disc_pipeline/src/tabulate.rs
//! TABULATE stage: one style, end to end (presence → accumulate → scale/round/clamp).
//! Pure; the two styles share nothing writable and may run on separate threads.

use disc_algo::{
    accumulate, extract_presence, to_percentages, AlgoError, AxisPercentages, CompiledStyle, RawAxisTotals,
};
use disc_core::Selection;

/// Per-style output, including the intermediate totals for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleTabulation {
    /// Number of selections the style actually read.
    pub considered: usize,
    pub raw: RawAxisTotals,
    pub percentages: AxisPercentages,
}

pub fn tabulate_style(selections: &[Selection], style: &CompiledStyle) -> Result<StyleTabulation, AlgoError> {
    let present = extract_presence(selections, style);
    let raw = accumulate(&present, style)?;
    let percentages = to_percentages(&raw, style)?;
    Ok(StyleTabulation { considered: present.len(), raw, percentages })
}
