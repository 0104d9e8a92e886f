// ABOUTME: Explicit progress state holding the last-known-good report for display
// ABOUTME: Replaces a global store; invalid refreshes are logged and leave the snapshot intact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Last-known-good progress state.
//!
//! The tracker is an ordinary value owned by whoever renders progress. It
//! is never partially updated: each successful refresh replaces the whole
//! report with a fresh computation, and a rejected refresh leaves the
//! previous report untouched so the display can keep showing it.
//!
//! The configured XP cost only seeds the tracker. A backend summary that
//! carries its own `xpPerLevel` replaces it, and later refreshes keep using
//! whichever cost the current state holds.

use crate::calculator::ExperienceState;
use crate::config::ProgressionConfig;
use crate::errors::AppResult;
use crate::missions::CompletionOutcome;
use crate::report::{ProgressReport, Reconciliation};
use crate::vitals::Vitals;
use serde_json::Value;
use tracing::{info, warn};

/// Progress state with last-known-good fallback
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    config: ProgressionConfig,
    state: ExperienceState,
    report: ProgressReport,
}

impl ProgressTracker {
    /// Start from a zeroed level-1 report
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if the configured XP cost is not positive.
    pub fn new(config: ProgressionConfig) -> AppResult<Self> {
        let state = ExperienceState::initial(config.xp_per_level)?;
        Ok(Self {
            config,
            state,
            report: ProgressReport::new(state.summary(), Vitals::default()),
        })
    }

    /// Last-known-good report
    #[must_use]
    pub const fn current(&self) -> &ProgressReport {
        &self.report
    }

    /// Validated state behind the current report
    #[must_use]
    pub const fn state(&self) -> ExperienceState {
        self.state
    }

    /// Configuration the tracker was built with
    #[must_use]
    pub const fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Recompute the report from a new XP total and vitals
    ///
    /// The XP cost of the current state is kept.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` for a negative total. The previous
    /// report stays in place.
    pub fn refresh(&mut self, xp_total: i64, vitals: Vitals) -> AppResult<&ProgressReport> {
        let state = self.state.with_total(xp_total).inspect_err(|error| {
            warn!(
                xp_total,
                last_known_xp = self.state.xp_total(),
                error = %error,
                "Rejected progress refresh; keeping last known summary"
            );
        })?;

        self.replace(state, vitals);
        Ok(&self.report)
    }

    /// Replace the report with a reconciled backend summary
    ///
    /// Missing `xpPerLevel` falls back to the cost currently in use.
    ///
    /// # Errors
    ///
    /// Returns the reconciliation error; the previous report stays in place.
    pub fn refresh_from_backend(&mut self, payload: &Value) -> AppResult<Reconciliation> {
        let config = self
            .config
            .with_xp_per_level(self.state.signed_xp_per_level());
        let reconciliation =
            ProgressReport::from_backend(payload, &config).inspect_err(|error| {
                warn!(
                    last_known_xp = self.state.xp_total(),
                    error = %error,
                    "Rejected backend progress summary; keeping last known summary"
                );
            })?;

        self.state = reconciliation.state;
        self.report = reconciliation.report;
        Ok(reconciliation)
    }

    /// Award XP, e.g. after a mission is completed
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` if the new total exceeds the
    /// supported XP range. The previous report stays in place.
    pub fn award(&mut self, xp: u64) -> AppResult<CompletionOutcome> {
        let next = self.state.add_xp(xp).inspect_err(|error| {
            warn!(xp, error = %error, "Rejected XP award; keeping last known summary");
        })?;

        let before = self.report.summary;
        self.replace(next, self.report.vitals());
        let after = self.report.summary;
        let levels_gained = after.levels_gained_since(&before);

        if levels_gained > 0 {
            info!(
                level_before = before.level,
                level_after = after.level,
                xp_total = after.xp_total,
                "Level up"
            );
        }

        Ok(CompletionOutcome {
            before,
            after,
            levels_gained,
        })
    }

    /// Forget all progress, e.g. on logout
    pub fn reset(&mut self) {
        self.replace(self.state.cleared(), Vitals::default());
    }

    fn replace(&mut self, state: ExperienceState, vitals: Vitals) {
        self.state = state;
        self.report = ProgressReport::new(state.summary(), vitals);
    }
}
