//! Presence extraction: keep only the selections a style reads.
//!
//! The polarity comes from the style configuration (`selection_polarity`), not
//! from code. Input order is preserved and nothing is deduplicated.

use disc_core::{Polarity, Selection};

use crate::style::CompiledStyle;

/// Selections whose polarity equals `polarity`, in input order.
pub fn iter_presence(selections: &[Selection], polarity: Polarity) -> impl Iterator<Item = &Selection> + '_ {
    selections.iter().filter(move |s| s.polarity == polarity)
}

/// Owned subsequence for `style`. Empty input (or no match) yields an empty vec.
pub fn extract_presence(selections: &[Selection], style: &CompiledStyle) -> Vec<Selection> {
    iter_presence(selections, style.polarity()).copied().collect()
}
