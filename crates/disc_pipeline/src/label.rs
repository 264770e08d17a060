//! Profile code resolution (1 or 2 axis letters) from natural-style percentages.
//!
//! Ordering key everywhere: percentage descending, then position in the
//! configured tie-break priority. Eligibility is `percentage >= threshold` on
//! exact values. No I/O. Deterministic across platforms.

use core::fmt;

use serde::{Serialize, Serializer};
use tracing::trace;

use disc_algo::AxisPercentages;
use disc_core::{determinism::sort_axes_by_score, Axis, AxisPriority, Ratio};

/// Dominant axis, optionally followed by the runner-up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProfileCode {
    primary: Axis,
    secondary: Option<Axis>,
}

impl ProfileCode {
    pub fn single(primary: Axis) -> Self {
        ProfileCode { primary, secondary: None }
    }

    pub fn pair(primary: Axis, secondary: Axis) -> Self {
        ProfileCode { primary, secondary: Some(secondary) }
    }

    pub fn primary(&self) -> Axis {
        self.primary
    }

    pub fn secondary(&self) -> Option<Axis> {
        self.secondary
    }
}

impl fmt::Display for ProfileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(s) = self.secondary {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl Serialize for ProfileCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Axes sorted by percentage descending, ties by `priority`.
pub fn rank_axes(pcts: &AxisPercentages, priority: &AxisPriority) -> [Axis; 4] {
    let scores = pcts.map(|_, p| p.ratio());
    let mut order = Axis::ALL;
    sort_axes_by_score(&mut order, &scores, priority);
    order
}

/// - two or more eligible: the top two by the ordering key;
/// - exactly one eligible: that axis alone;
/// - none eligible: the single highest axis (ties by priority).
pub fn resolve_profile_code(pcts: &AxisPercentages, priority: &AxisPriority, threshold: Ratio) -> ProfileCode {
    let order = rank_axes(pcts, priority);
    let mut eligible = order.iter().copied().filter(|a| pcts[*a].ratio() >= threshold);

    match (eligible.next(), eligible.next()) {
        (Some(first), Some(second)) => ProfileCode::pair(first, second),
        (Some(only), None) => ProfileCode::single(only),
        _ => {
            trace!(axis = %order[0], threshold = %threshold, "no axis eligible; falling back to highest");
            ProfileCode::single(order[0])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disc_core::{AxisMap, Percent};
    use proptest::prelude::*;

    fn pcts(d: i128, i: i128, s: i128, c: i128) -> AxisPercentages {
        AxisMap { d, i, s, c }.map(|_, v| Percent::from_ratio(Ratio::from_int(*v)))
    }

    fn code(p: &AxisPercentages) -> String {
        resolve_profile_code(p, &AxisPriority::DEFAULT, Ratio::from_int(50)).to_string()
    }

    #[test]
    fn two_eligible_gives_two_letters() {
        assert_eq!(code(&pcts(62, 55, 20, 10)), "DI");
        // Higher percentage leads even when priority says otherwise.
        assert_eq!(code(&pcts(55, 62, 20, 10)), "ID");
    }

    #[test]
    fn one_eligible_gives_one_letter() {
        assert_eq!(code(&pcts(70, 30, 20, 10)), "D");
        assert_eq!(code(&pcts(10, 20, 50, 49)), "S");
    }

    #[test]
    fn none_eligible_falls_back_to_highest() {
        assert_eq!(code(&pcts(40, 40, 40, 40)), "D");
        assert_eq!(code(&pcts(10, 20, 30, 45)), "C");
        assert_eq!(code(&pcts(0, 0, 0, 0)), "D");
    }

    #[test]
    fn equal_percentages_follow_configured_priority() {
        // Default D, I, C, S: C outranks S.
        assert_eq!(code(&pcts(10, 10, 60, 60)), "CS");
        assert_eq!(code(&pcts(60, 60, 60, 60)), "DI");
        assert_eq!(code(&pcts(10, 10, 30, 30)), "C");

        let custom = AxisPriority::new(&[Axis::S, Axis::C, Axis::I, Axis::D]).unwrap();
        let p = pcts(60, 60, 60, 60);
        assert_eq!(resolve_profile_code(&p, &custom, Ratio::from_int(50)).to_string(), "SC");
    }

    #[test]
    fn threshold_is_inclusive_and_configurable() {
        assert_eq!(code(&pcts(50, 50, 0, 0)), "DI");
        let t = Ratio::parse_decimal("50.5").unwrap();
        assert_eq!(resolve_profile_code(&pcts(50, 51, 0, 0), &AxisPriority::DEFAULT, t).to_string(), "I");
    }

    #[test]
    fn serializes_as_letters() {
        let c = ProfileCode::pair(Axis::S, Axis::C);
        assert_eq!(serde_json::to_string(&c).unwrap(), r#""SC""#);
        assert_eq!(c.secondary(), Some(Axis::C));
        assert_eq!(ProfileCode::single(Axis::D).secondary(), None);
    }

    proptest! {
        #[test]
        fn code_is_one_or_two_distinct_letters_led_by_a_maximum(
            d in 0i128..=100, i in 0i128..=100, s in 0i128..=100, c in 0i128..=100
        ) {
            let p = pcts(d, i, s, c);
            let r = resolve_profile_code(&p, &AxisPriority::DEFAULT, Ratio::from_int(50));
            let max = d.max(i).max(s).max(c);
            prop_assert_eq!(p[r.primary()].ratio(), Ratio::from_int(max));
            if let Some(sec) = r.secondary() {
                prop_assert_ne!(sec, r.primary());
                prop_assert!(p[sec].ratio() >= Ratio::from_int(50));
            }
            let s = r.to_string();
            prop_assert!(s.len() == 1 || s.len() == 2);
        }
    }
}
