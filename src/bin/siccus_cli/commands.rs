// ABOUTME: Command implementations for siccus-cli
// ABOUTME: Each command returns a serializable result; main.rs prints it as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

use serde_json::{json, Value};
use siccus::errors::{AppError, AppResult};
use siccus::progression::missions::{project_completion, CompletionOutcome};
use siccus::progression::{
    clamp_percent, compute_summary, xp_threshold, DriftPolicy, ExperienceState, ProgressReport,
    ProgressionConfig, Reconciliation, Vitals,
};
use std::io;
use tracing::info;

/// Marker for reading the payload from stdin
const STDIN_PAYLOAD: &str = "-";

pub fn summary(
    config: &ProgressionConfig,
    xp: i64,
    xp_per_level: Option<i64>,
    energy: Option<f64>,
    health: Option<f64>,
) -> AppResult<ProgressReport> {
    let summary = compute_summary(xp, xp_per_level.unwrap_or(config.xp_per_level))?;
    Ok(ProgressReport::new(summary, Vitals::new(energy, health)))
}

pub fn reconcile(config: &ProgressionConfig, payload: &str, strict: bool) -> AppResult<Reconciliation> {
    let raw = if payload == STDIN_PAYLOAD {
        io::read_to_string(io::stdin())
            .map_err(|e| AppError::internal(format!("Failed to read payload from stdin: {e}")))?
    } else {
        payload.to_owned()
    };

    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::invalid_input(format!("Payload is not valid JSON: {e}")))?;

    let config = if strict {
        config.with_drift_policy(DriftPolicy::Reject)
    } else {
        *config
    };

    let reconciliation = ProgressReport::from_backend(&value, &config)?;
    info!(
        drifted_fields = reconciliation.drift.len(),
        "Reconciled backend payload"
    );
    Ok(reconciliation)
}

pub fn project(
    config: &ProgressionConfig,
    xp: i64,
    mission_xp: u64,
    xp_per_level: Option<i64>,
) -> AppResult<CompletionOutcome> {
    let state = ExperienceState::new(xp, xp_per_level.unwrap_or(config.xp_per_level))?;
    project_completion(state, mission_xp)
}

pub fn threshold(config: &ProgressionConfig, level: u64, xp_per_level: Option<i64>) -> AppResult<Value> {
    let xp = xp_threshold(level, xp_per_level.unwrap_or(config.xp_per_level))?;
    Ok(json!({ "level": level, "xpThreshold": xp }))
}

pub fn clamp(value: Option<f64>) -> Value {
    json!(clamp_percent(value))
}
