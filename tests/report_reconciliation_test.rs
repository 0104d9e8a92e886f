// ABOUTME: Integration tests for backend summary payload validation and drift detection
// ABOUTME: Validates backend field names and aliases, boundary rejection, drift policies and wire shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

use serde_json::{json, Value};
use siccus::errors::{AppResult, ErrorCode};
use siccus::progression::{
    DriftPolicy, ExperienceState, ProgressReport, ProgressionConfig, Reconciliation, Vitals,
};

fn reconcile(payload: &Value) -> AppResult<Reconciliation> {
    ProgressReport::from_backend(payload, &ProgressionConfig::default())
}

#[test]
fn test_backend_payload() {
    let payload = json!({
        "xpTotal": 1450,
        "energiaTotal": 85,
        "saludTotal": 92,
        "nivel": 15
    });

    let reconciliation = reconcile(&payload).unwrap();
    assert!(reconciliation.is_consistent());

    let report = reconciliation.report;
    assert_eq!(report.summary.level, 15);
    assert_eq!(report.summary.xp_per_level, 100);
    assert_eq!(report.energy_total, 85.0);
    assert_eq!(report.health_total, 92.0);
}

#[test]
fn test_backend_field_names_win_over_aliases() {
    let payload = json!({
        "xpTotal": 10,
        "energyTotal": 40,
        "energiaTotal": 90,
        "healthTotal": 150
    });

    let report = reconcile(&payload).unwrap().report;
    assert_eq!(report.energy_total, 90.0);
    assert_eq!(report.health_total, 100.0);
}

#[test]
fn test_null_fields_fall_through_to_aliases() {
    let payload = json!({
        "xpTotal": 1450,
        "energiaTotal": null,
        "energyTotal": 80,
        "nivel": null,
        "level": 12
    });

    let reconciliation = reconcile(&payload).unwrap();
    assert_eq!(reconciliation.report.energy_total, 80.0);
    assert_eq!(Vitals::from_payload(&payload).energy, 80.0);

    let fields: Vec<&str> = reconciliation.drift.iter().map(|d| d.field).collect();
    assert_eq!(fields, vec!["level"]);
}

#[test]
fn test_report_serializes_to_summary_endpoint_shape() {
    let report = ProgressReport::zeroed(&ProgressionConfig::default()).unwrap();
    let value = serde_json::to_value(report).unwrap();

    assert_eq!(value["nivel"], 1);
    assert_eq!(value["energiaTotal"], 0.0);
    assert_eq!(value["saludTotal"], 0.0);
    for english in ["level", "energyTotal", "healthTotal"] {
        assert!(value.get(english).is_none(), "unexpected {english}");
    }

    let reconciliation = reconcile(&value).unwrap();
    assert!(reconciliation.is_consistent());
    assert_eq!(reconciliation.report, report);
}

#[test]
fn test_full_backend_shape_without_drift() {
    let payload = json!({
        "xpTotal": 730,
        "xpPerLevel": 100,
        "nivel": 8,
        "nextLevel": 9,
        "xpForCurrentLevelStart": 700,
        "xpForNextLevel": 800,
        "xpIntoLevel": 30,
        "xpToNext": 70,
        "progressPct": 30.0,
        "energiaTotal": 55.5,
        "saludTotal": 60.0
    });

    let reconciliation = reconcile(&payload).unwrap();
    assert!(reconciliation.is_consistent(), "{:?}", reconciliation.drift);

    let round_trip = serde_json::to_value(reconciliation.report).unwrap();
    assert_eq!(round_trip, payload);
}

#[test]
fn test_hardcoded_level_is_reported_as_drift() {
    let payload = json!({ "xpTotal": 450, "level": 12 });

    let reconciliation = reconcile(&payload).unwrap();
    assert_eq!(reconciliation.report.summary.level, 5);
    assert_eq!(reconciliation.drift.len(), 1);

    let drift = &reconciliation.drift[0];
    assert_eq!(drift.field, "level");
    assert_eq!(drift.backend, json!(12));
    assert_eq!(drift.computed, json!(5));
}

#[test]
fn test_reject_policy_returns_drift_details() {
    let config = ProgressionConfig::default().with_drift_policy(DriftPolicy::Reject);
    let payload = json!({ "xpTotal": 450, "level": 12, "xpToNext": 50 });

    let error = ProgressReport::from_backend(&payload, &config).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let drift = error.details.unwrap()["drift"].clone();
    assert_eq!(drift.as_array().unwrap().len(), 1);
    assert_eq!(drift[0]["field"], "level");
}

#[test]
fn test_reject_policy_accepts_consistent_payload() {
    let config = ProgressionConfig::default().with_drift_policy(DriftPolicy::Reject);
    let payload = json!({ "xpTotal": 450, "level": 5 });
    assert!(ProgressReport::from_backend(&payload, &config).is_ok());
}

#[test]
fn test_non_numeric_fields_are_rejected() {
    for payload in [
        json!({ "xpTotal": "1450" }),
        json!({ "xpTotal": true }),
        json!({ "xpTotal": 12.5 }),
        json!({ "xpTotal": 100, "xpPerLevel": "100" }),
        json!({ "xpTotal": 100, "xpPerLevel": 0 }),
        json!({ "xpTotal": -1 }),
        json!({}),
        json!([1450]),
        json!(null),
    ] {
        let error = reconcile(&payload).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput, "payload={payload}");
    }
}

#[test]
fn test_integral_float_total_is_accepted() {
    let report = reconcile(&json!({ "xpTotal": 1450.0 })).unwrap().report;
    assert_eq!(report.summary.xp_total, 1450);
}

#[test]
fn test_experience_state_deserialization_validates() {
    let state: ExperienceState =
        serde_json::from_value(json!({ "xpTotal": 320, "xpPerLevel": 50 })).unwrap();
    assert_eq!(state.summary().level, 7);

    assert!(serde_json::from_value::<ExperienceState>(json!({ "xpTotal": -5 })).is_err());
    assert!(serde_json::from_value::<ExperienceState>(json!({ "xpPerLevel": 50 })).is_err());
}

#[test]
fn test_zeroed_report() {
    let report = ProgressReport::zeroed(&ProgressionConfig::default()).unwrap();
    assert_eq!(report.summary.level, 1);
    assert_eq!(report.vitals(), Vitals::default());
}
