//! variables.rs: wire shapes of the scoring configuration asset.
//!
//! These types mirror `schemas/scoring_config.schema.json` one-to-one. They are
//! plain data; semantic checks (complete mapping table, non-zero denominators,
//! clamp bounds, …) happen when a style is compiled in `disc_algo`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::rounding::RoundingFn;
use crate::selection::{Polarity, StatementId};

/// ------------ Macros ------------

/// Define a serde’d enum with explicit wire tokens.
macro_rules! serde_enum {
    ($name:ident => { $($variant:ident = $token:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }
    };
}

// ------------ Canonical enums (wire tokens explicit) ------------

serde_enum!(ScalingMode => {
    PerAxisIndependent = "per_axis_independent",
    NormalizeTo100     = "normalize_to_100"
});

serde_enum!(AppliedAfter => {
    Scaling = "scaling",
    Clamp   = "clamp"
});

serde_enum!(StyleKind => {
    Natural  = "natural",
    Response = "response"
});

impl Default for AppliedAfter {
    fn default() -> Self {
        AppliedAfter::Scaling
    }
}

impl StyleKind {
    pub const ALL: [StyleKind; 2] = [StyleKind::Natural, StyleKind::Response];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleKind::Natural => "natural",
            StyleKind::Response => "response",
        }
    }
}

impl core::fmt::Display for StyleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ------------ Defaults ------------

fn default_primary_weight() -> f64 { 1.0 }
fn default_secondary_weight() -> f64 { 0.5 }
fn default_eligibility_threshold() -> f64 { 50.0 }
fn default_tie_break_priority() -> Vec<Axis> {
    vec![Axis::D, Axis::I, Axis::C, Axis::S]
}

/// ------------ Complex shapes ------------

/// One configuration row: which axes a statement feeds, and how strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementMapping {
    pub statement_id: StatementId,
    pub primary_axis: Axis,
    pub secondary_axis: Axis,
    #[serde(default = "default_primary_weight")]
    pub primary_weight: f64,
    #[serde(default = "default_secondary_weight")]
    pub secondary_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundingSpec {
    pub function: RoundingFn,
    pub decimals: u32,
    #[serde(default)]
    pub applied_after: AppliedAfter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampRange {
    pub min: f64,
    pub max: f64,
}

/// One style's full configuration (natural or response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfigDoc {
    pub axes: Vec<Axis>,
    pub selection_polarity: Polarity,
    /// Required under `per_axis_independent`; ignored under `normalize_to_100`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub denominators: BTreeMap<Axis, f64>,
    pub scaling_mode: ScalingMode,
    pub rounding: RoundingSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp: Option<ClampRange>,
    pub mappings: Vec<StatementMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylesDoc {
    pub natural: StyleConfigDoc,
    pub response: StyleConfigDoc,
}

impl StylesDoc {
    pub fn get(&self, kind: StyleKind) -> &StyleConfigDoc {
        match kind {
            StyleKind::Natural => &self.natural,
            StyleKind::Response => &self.response,
        }
    }
}

/// The whole versioned configuration asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigDoc {
    pub version: String,
    #[serde(default = "default_tie_break_priority")]
    pub tie_break_priority: Vec<Axis>,
    #[serde(default = "default_eligibility_threshold")]
    pub eligibility_threshold: f64,
    pub styles: StylesDoc,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: &str = r#"{
        "axes": ["D","I","S","C"],
        "selection_polarity": "least",
        "denominators": {"D": 24, "I": 24, "S": 24, "C": 24},
        "scaling_mode": "per_axis_independent",
        "rounding": {"function": "round", "decimals": 0},
        "mappings": [{"statement_id": 1, "primary_axis": "D", "secondary_axis": "I"}]
    }"#;

    #[test]
    fn style_defaults_apply() {
        let s: StyleConfigDoc = serde_json::from_str(STYLE).unwrap();
        assert_eq!(s.rounding.applied_after, AppliedAfter::Scaling);
        assert_eq!(s.clamp, None);
        assert_eq!(s.mappings[0].primary_weight, 1.0);
        assert_eq!(s.mappings[0].secondary_weight, 0.5);
        assert_eq!(s.denominators.get(&Axis::S), Some(&24.0));
    }

    #[test]
    fn top_level_defaults_apply() {
        let doc = format!(r#"{{"version":"t","styles":{{"natural":{STYLE},"response":{STYLE}}}}}"#);
        let d: ScoringConfigDoc = serde_json::from_str(&doc).unwrap();
        assert_eq!(d.tie_break_priority, vec![Axis::D, Axis::I, Axis::C, Axis::S]);
        assert_eq!(d.eligibility_threshold, 50.0);
        assert_eq!(d.styles.get(StyleKind::Natural).selection_polarity, Polarity::Least);
    }

    #[test]
    fn negative_decimals_do_not_parse() {
        let bad = STYLE.replace(r#""decimals": 0"#, r#""decimals": -1"#);
        assert!(serde_json::from_str::<StyleConfigDoc>(&bad).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let bad = STYLE.replace(r#""axes""#, r#""bogus": 1, "axes""#);
        assert!(serde_json::from_str::<StyleConfigDoc>(&bad).is_err());
    }
}
