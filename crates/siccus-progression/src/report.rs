// ABOUTME: Flat dashboard progress report and reconciliation of backend summary payloads
// ABOUTME: Recomputes derived fields from xpTotal and records any drift from the backend's numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Dashboard report.
//!
//! The backend `/progreso/user/{id}/summary` endpoint returns the derived
//! leveling fields alongside `xpTotal`. Screens must all show the same
//! numbers, so the report is always rebuilt from `xpTotal`/`xpPerLevel`
//! and the backend's derived fields are only compared, never trusted.

use crate::calculator::{field_or_alias, integer_value, present, ExperienceState, ProgressSummary};
use crate::config::{DriftPolicy, ProgressionConfig};
use crate::errors::{AppError, AppResult};
use crate::vitals::Vitals;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use siccus_core::constants::payload_fields;
use tracing::{debug, warn};

/// Largest tolerated difference between backend and local `progressPct`
///
/// Backends commonly round the percentage to two decimals.
const PROGRESS_PCT_TOLERANCE: f64 = 0.01;

/// Progress summary plus vitals, serialized as the flat backend shape
///
/// On the wire the level and vitals use the summary endpoint's names
/// (`nivel`, `energiaTotal`, `saludTotal`), so a report can be stored
/// wherever a backend summary is expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "SummaryPayload", from = "SummaryPayload")]
pub struct ProgressReport {
    /// Derived leveling fields
    pub summary: ProgressSummary,
    /// Energy, clamped to `[0, 100]`
    pub energy_total: f64,
    /// Health, clamped to `[0, 100]`
    pub health_total: f64,
}

/// Wire shape of `/progreso/user/{id}/summary`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPayload {
    xp_total: u64,
    xp_per_level: u64,
    nivel: u64,
    next_level: u64,
    xp_for_current_level_start: u64,
    xp_for_next_level: u64,
    xp_into_level: u64,
    xp_to_next: u64,
    progress_pct: f64,
    energia_total: f64,
    salud_total: f64,
}

impl From<ProgressReport> for SummaryPayload {
    fn from(report: ProgressReport) -> Self {
        let summary = report.summary;
        Self {
            xp_total: summary.xp_total,
            xp_per_level: summary.xp_per_level,
            nivel: summary.level,
            next_level: summary.next_level,
            xp_for_current_level_start: summary.xp_for_current_level_start,
            xp_for_next_level: summary.xp_for_next_level,
            xp_into_level: summary.xp_into_level,
            xp_to_next: summary.xp_to_next,
            progress_pct: summary.progress_pct,
            energia_total: report.energy_total,
            salud_total: report.health_total,
        }
    }
}

impl From<SummaryPayload> for ProgressReport {
    fn from(payload: SummaryPayload) -> Self {
        Self {
            summary: ProgressSummary {
                xp_total: payload.xp_total,
                xp_per_level: payload.xp_per_level,
                level: payload.nivel,
                next_level: payload.next_level,
                xp_for_current_level_start: payload.xp_for_current_level_start,
                xp_for_next_level: payload.xp_for_next_level,
                xp_into_level: payload.xp_into_level,
                xp_to_next: payload.xp_to_next,
                progress_pct: payload.progress_pct,
            },
            energy_total: payload.energia_total,
            health_total: payload.salud_total,
        }
    }
}

impl ProgressReport {
    /// Combine a summary with vitals
    #[must_use]
    pub const fn new(summary: ProgressSummary, vitals: Vitals) -> Self {
        Self {
            summary,
            energy_total: vitals.energy,
            health_total: vitals.health,
        }
    }

    /// Report for a fresh account: level 1, no XP, empty vitals
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if the configured XP cost is not positive.
    pub fn zeroed(config: &ProgressionConfig) -> AppResult<Self> {
        Ok(Self::new(
            ProgressSummary::zeroed(config.xp_per_level)?,
            Vitals::default(),
        ))
    }

    /// Vitals carried by the report
    #[must_use]
    pub const fn vitals(&self) -> Vitals {
        Vitals {
            energy: self.energy_total,
            health: self.health_total,
        }
    }

    /// Validate a backend summary payload and rebuild it locally
    ///
    /// `xpTotal` is required; `xpPerLevel` falls back to the configured
    /// cost. Every derived field the backend sent is compared with the
    /// local computation and mismatches are returned as [`Drift`] entries.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `xpTotal`/`xpPerLevel` are
    /// missing, non-integer or out of range, or if drift is detected under
    /// [`DriftPolicy::Reject`].
    pub fn from_backend(payload: &Value, config: &ProgressionConfig) -> AppResult<Reconciliation> {
        let state = ExperienceState::from_json(payload, config.xp_per_level)?;
        let summary = state.summary();
        let report = Self::new(summary, Vitals::from_payload(payload));
        let drift = detect_drift(payload, &summary);

        if drift.is_empty() {
            debug!(
                xp_total = summary.xp_total,
                level = summary.level,
                "Backend progress summary matches local computation"
            );
        } else {
            warn!(
                xp_total = summary.xp_total,
                drifted_fields = drift.len(),
                policy = config.drift_policy.as_str(),
                "Backend progress summary disagrees with local computation"
            );

            if config.drift_policy == DriftPolicy::Reject {
                return Err(AppError::invalid_input(
                    "Backend progress summary is inconsistent with its xpTotal",
                )
                .with_details(json!({ "drift": drift })));
            }
        }

        Ok(Reconciliation {
            state,
            report,
            drift,
        })
    }
}

/// A derived field where the backend and the local computation disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drift {
    /// Payload key the backend value was read from
    pub field: &'static str,
    /// Value the backend sent
    pub backend: Value,
    /// Value computed locally from `xpTotal`
    pub computed: Value,
}

/// Result of rebuilding a backend payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Validated `xpTotal`/`xpPerLevel` the report was computed from
    #[serde(skip)]
    pub state: ExperienceState,
    /// Locally recomputed report
    pub report: ProgressReport,
    /// Fields where the backend disagreed
    pub drift: Vec<Drift>,
}

impl Reconciliation {
    /// True when the backend's derived fields all matched
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.drift.is_empty()
    }
}

fn detect_drift(payload: &Value, summary: &ProgressSummary) -> Vec<Drift> {
    let expected = [
        (
            payload_fields::LEVEL,
            Some(payload_fields::LEVEL_ALIAS),
            summary.level,
        ),
        (payload_fields::NEXT_LEVEL, None, summary.next_level),
        (
            payload_fields::XP_FOR_CURRENT_LEVEL_START,
            None,
            summary.xp_for_current_level_start,
        ),
        (
            payload_fields::XP_FOR_NEXT_LEVEL,
            None,
            summary.xp_for_next_level,
        ),
        (payload_fields::XP_INTO_LEVEL, None, summary.xp_into_level),
        (payload_fields::XP_TO_NEXT, None, summary.xp_to_next),
    ];

    let mut drift = Vec::new();

    for (field, alias, computed) in expected {
        let found = match alias {
            Some(alias) => field_or_alias(payload, field, alias),
            None => present(payload, field).map(|value| (field, value)),
        };
        let Some((key, backend)) = found else {
            continue;
        };

        let backend_value = integer_value(backend).and_then(|v| u64::try_from(v).ok());
        if backend_value != Some(computed) {
            drift.push(Drift {
                field: key,
                backend: backend.clone(),
                computed: json!(computed),
            });
        }
    }

    if let Some(backend) = present(payload, payload_fields::PROGRESS_PCT) {
        let within_tolerance = backend
            .as_f64()
            .is_some_and(|pct| (pct - summary.progress_pct).abs() <= PROGRESS_PCT_TOLERANCE);
        if !within_tolerance {
            drift.push(Drift {
                field: payload_fields::PROGRESS_PCT,
                backend: backend.clone(),
                computed: json!(summary.progress_pct),
            });
        }
    }

    drift
}
