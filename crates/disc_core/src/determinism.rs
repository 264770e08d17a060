//! Determinism utilities: configured axis priority and stable axis ranking.
//!
//! This module is **I/O-free**. Tie-breaks never depend on enumeration order,
//! hash order or input order; they depend only on the configured priority list.

use core::cmp::Ordering;

use crate::axis::{Axis, AxisMap};
use crate::errors::CoreError;

/* -------------------------------------------------------------------------- */
/*                               Axis priority                                 */
/* -------------------------------------------------------------------------- */

/// A permutation of the four axes, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisPriority([Axis; 4]);

impl AxisPriority {
    /// D, I, C, S. C deliberately outranks S.
    pub const DEFAULT: AxisPriority = AxisPriority([Axis::D, Axis::I, Axis::C, Axis::S]);

    /// Accepts exactly the four axes, each once.
    pub fn new(order: &[Axis]) -> Result<Self, CoreError> {
        let arr: [Axis; 4] = order.try_into().map_err(|_| CoreError::PriorityNotPermutation)?;
        let mut seen = [false; 4];
        for a in arr {
            if core::mem::replace(&mut seen[a.index()], true) {
                return Err(CoreError::PriorityNotPermutation);
            }
        }
        Ok(AxisPriority(arr))
    }

    /// Position in the list (0 = highest priority).
    #[inline]
    pub fn rank(&self, axis: Axis) -> usize {
        self.0.iter().position(|a| *a == axis).unwrap_or(usize::MAX)
    }

    pub fn as_slice(&self) -> &[Axis] {
        &self.0
    }
}

impl Default for AxisPriority {
    fn default() -> Self {
        AxisPriority::DEFAULT
    }
}

/* -------------------------------------------------------------------------- */
/*                              Stable ranking                                 */
/* -------------------------------------------------------------------------- */

/// Score descending, then priority ascending. Total order over distinct axes.
#[inline]
pub fn cmp_score_desc_then_priority<T: Ord>(
    a: Axis,
    b: Axis,
    scores: &AxisMap<T>,
    priority: &AxisPriority,
) -> Ordering {
    scores[b]
        .cmp(&scores[a])
        .then_with(|| priority.rank(a).cmp(&priority.rank(b)))
}

/// Sort `axes` **in place** by score descending, ties by priority.
pub fn sort_axes_by_score<T: Ord>(axes: &mut [Axis], scores: &AxisMap<T>, priority: &AxisPriority) {
    axes.sort_by(|a, b| cmp_score_desc_then_priority(*a, *b, scores, priority));
}

/* ---------------------------------- Tests --------------------------------- */
