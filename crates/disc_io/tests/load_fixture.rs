//! Loads the shared fixture asset end to end.

use std::path::PathBuf;

use disc_core::{
    variables::{ScalingMode, StyleKind},
    Axis, Polarity, RoundingFn, StatementId,
};
use disc_io::prelude::*;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/scoring_config.json")
}

#[test]
fn fixture_loads_and_validates() {
    let cfg = load_config(&fixture()).expect("fixture loads");
    let doc = &cfg.doc;

    assert_eq!(doc.version, "fixture-2024.1");
    assert_eq!(doc.tie_break_priority, vec![Axis::D, Axis::I, Axis::C, Axis::S]);

    let natural = doc.styles.get(StyleKind::Natural);
    assert_eq!(natural.selection_polarity, Polarity::Least);
    assert_eq!(natural.scaling_mode, ScalingMode::PerAxisIndependent);
    assert_eq!(natural.mappings.len(), 96);

    let response = doc.styles.get(StyleKind::Response);
    assert_eq!(response.selection_polarity, Polarity::Most);
    assert_eq!(response.rounding.function, RoundingFn::Bankers);
    assert!(response.clamp.is_none());
    assert!(response.denominators.is_empty());

    let row7 = natural.mappings.iter().find(|m| m.statement_id == StatementId(7)).unwrap();
    assert_eq!((row7.primary_axis, row7.secondary_axis), (Axis::S, Axis::D));
}

#[test]
fn fingerprint_is_stable_across_loads() {
    let a = load_config(&fixture()).unwrap();
    let b = load_config(&fixture()).unwrap();
    assert_eq!(a.config_sha256, b.config_sha256);
    assert_eq!(a.config_sha256, sha256_canonical(&a.doc).unwrap());
}

#[test]
fn canonical_doc_round_trips_through_json() {
    let cfg = load_config(&fixture()).unwrap();
    let bytes = to_canonical_bytes(&cfg.doc).unwrap();
    let again = load_config_from_str(std::str::from_utf8(&bytes).unwrap()).unwrap();
    assert_eq!(again.doc, cfg.doc);
    assert_json_diff::assert_json_eq!(
        serde_json::to_value(&again.doc).unwrap(),
        serde_json::to_value(&cfg.doc).unwrap()
    );
}
