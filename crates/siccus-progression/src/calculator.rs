// ABOUTME: XP leveling calculator converting cumulative experience into a progress summary
// ABOUTME: Validates ExperienceState at the boundary and derives level, thresholds, and percent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Flat-cost leveling model.
//!
//! With a constant cost `P` per level and a cumulative total `X`:
//!
//! - `level = floor(X / P) + 1`
//! - `xpForCurrentLevelStart = (level - 1) * P`
//! - `xpForNextLevel = level * P`
//! - `xpIntoLevel = X - xpForCurrentLevelStart`
//! - `xpToNext = xpForNextLevel - X`
//! - `progressPct = 100 * xpIntoLevel / P`
//!
//! A total that lands exactly on a multiple of `P` belongs to the level that
//! starts there, with zero progress, never to the previous level at 100%.

use crate::errors::{AppError, AppResult};
use crate::percent;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use siccus_core::constants::{leveling, payload_fields};
use std::num::NonZeroU64;
use tracing::debug;

/// Validated input of the leveling model
///
/// `xp_total` is always within `0..=i64::MAX` and `xp_per_level` is never
/// zero, so every derived threshold fits in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawExperienceState")]
pub struct ExperienceState {
    xp_total: u64,
    xp_per_level: NonZeroU64,
}

/// Wire shape accepted before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExperienceState {
    xp_total: i64,
    #[serde(default = "default_xp_per_level")]
    xp_per_level: i64,
}

const fn default_xp_per_level() -> i64 {
    leveling::DEFAULT_XP_PER_LEVEL
}

impl TryFrom<RawExperienceState> for ExperienceState {
    type Error = AppError;

    fn try_from(raw: RawExperienceState) -> AppResult<Self> {
        Self::new(raw.xp_total, raw.xp_per_level)
    }
}

impl ExperienceState {
    /// Validate a raw XP total and level cost
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `xp_total` is negative or
    /// `xp_per_level` is zero or negative.
    pub fn new(xp_total: i64, xp_per_level: i64) -> AppResult<Self> {
        let total = validated_total(xp_total)?;

        let per_level = u64::try_from(xp_per_level)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "xpPerLevel must be positive, got {xp_per_level}"
                ))
                .with_details(json!({
                    "field": payload_fields::XP_PER_LEVEL,
                    "value": xp_per_level
                }))
            })?;

        Ok(Self {
            xp_total: total,
            xp_per_level: per_level,
        })
    }

    /// Fresh account state: zero XP at the given level cost
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `xp_per_level` is not positive.
    pub fn initial(xp_per_level: i64) -> AppResult<Self> {
        Self::new(0, xp_per_level)
    }

    /// Parse a `{ "xpTotal": n, "xpPerLevel": n }` payload
    ///
    /// `xpPerLevel` is optional and falls back to `default_xp_per_level`.
    /// Integral floats such as `1450.0` are accepted; fractions, strings,
    /// booleans and missing totals are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if the payload is not an object, a
    /// field is missing or not an integer, or the values fail [`Self::new`].
    pub fn from_json(payload: &Value, default_xp_per_level: i64) -> AppResult<Self> {
        if !payload.is_object() {
            return Err(AppError::invalid_format("payload", "a JSON object"));
        }

        let xp_total = integer_field(payload, payload_fields::XP_TOTAL)?
            .ok_or_else(|| AppError::missing_field(payload_fields::XP_TOTAL))?;
        let xp_per_level =
            integer_field(payload, payload_fields::XP_PER_LEVEL)?.unwrap_or(default_xp_per_level);

        Self::new(xp_total, xp_per_level)
    }

    /// Cumulative XP
    #[must_use]
    pub const fn xp_total(&self) -> u64 {
        self.xp_total
    }

    /// XP cost of one level
    #[must_use]
    pub const fn xp_per_level(&self) -> u64 {
        self.xp_per_level.get()
    }

    /// XP cost of one level in the signed form configuration uses
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // Safe: always validated from an i64
    pub const fn signed_xp_per_level(&self) -> i64 {
        self.xp_per_level.get() as i64
    }

    /// Same level cost with a new, validated XP total
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `xp_total` is negative.
    pub fn with_total(self, xp_total: i64) -> AppResult<Self> {
        let total = validated_total(xp_total)?;

        Ok(Self {
            xp_total: total,
            ..self
        })
    }

    /// Same level cost with no XP
    #[must_use]
    pub const fn cleared(self) -> Self {
        Self {
            xp_total: 0,
            xp_per_level: self.xp_per_level,
        }
    }

    /// State after earning `xp` more points
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` if the new total exceeds `i64::MAX`.
    pub fn add_xp(self, xp: u64) -> AppResult<Self> {
        let total = self
            .xp_total
            .checked_add(xp)
            .filter(|total| i64::try_from(*total).is_ok())
            .ok_or_else(|| {
                AppError::out_of_range(format!(
                    "Adding {xp} XP to {} exceeds the supported XP range",
                    self.xp_total
                ))
            })?;

        Ok(Self {
            xp_total: total,
            ..self
        })
    }

    /// Derive the full progress summary
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        let per_level = self.xp_per_level.get();
        let completed_levels = self.xp_total / per_level;
        let level_start = completed_levels * per_level;
        // xp_total <= i64::MAX and per_level <= i64::MAX, so this cannot wrap
        let next_level_start = level_start + per_level;
        let xp_into_level = self.xp_total - level_start;

        ProgressSummary {
            xp_total: self.xp_total,
            xp_per_level: per_level,
            level: completed_levels + leveling::FIRST_LEVEL,
            next_level: completed_levels + leveling::FIRST_LEVEL + 1,
            xp_for_current_level_start: level_start,
            xp_for_next_level: next_level_start,
            xp_into_level,
            xp_to_next: next_level_start - self.xp_total,
            progress_pct: percent::level_progress(xp_into_level, per_level),
        }
    }
}

/// Derived progress record rendered by dashboard and achievement views
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Cumulative XP the summary was derived from
    pub xp_total: u64,
    /// XP cost of one level
    pub xp_per_level: u64,
    /// Current level, starting at 1
    pub level: u64,
    /// Level reached at the next threshold
    pub next_level: u64,
    /// XP at which the current level started
    pub xp_for_current_level_start: u64,
    /// XP at which the next level starts
    pub xp_for_next_level: u64,
    /// XP earned inside the current level, in `[0, xp_per_level)`
    pub xp_into_level: u64,
    /// XP still missing for the next level, in `(0, xp_per_level]`
    pub xp_to_next: u64,
    /// Percent of the current level completed, in `[0, 100)`
    pub progress_pct: f64,
}

impl ProgressSummary {
    /// Summary of an account with no XP yet
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `xp_per_level` is not positive.
    pub fn zeroed(xp_per_level: i64) -> AppResult<Self> {
        Ok(ExperienceState::initial(xp_per_level)?.summary())
    }

    /// True when the total sits exactly on a level threshold
    #[must_use]
    pub const fn is_level_start(&self) -> bool {
        self.xp_into_level == 0
    }

    /// Levels gained relative to an earlier summary
    #[must_use]
    pub const fn levels_gained_since(&self, earlier: &Self) -> u64 {
        self.level.saturating_sub(earlier.level)
    }
}

/// Compute the progress summary for a raw XP total and level cost
///
/// # Errors
///
/// Returns `ErrorCode::InvalidInput` if `xp_total < 0` or `xp_per_level <= 0`.
/// Invalid inputs are never clamped into a plausible level-1 summary.
///
/// # Example
///
/// ```rust
/// use siccus_progression::compute_summary;
///
/// # fn example() -> siccus_progression::errors::AppResult<()> {
/// let summary = compute_summary(1450, 100)?;
/// assert_eq!(summary.level, 15);
/// assert_eq!(summary.xp_to_next, 50);
/// # Ok(())
/// # }
/// ```
pub fn compute_summary(xp_total: i64, xp_per_level: i64) -> AppResult<ProgressSummary> {
    let state = ExperienceState::new(xp_total, xp_per_level).inspect_err(|error| {
        debug!(xp_total, xp_per_level, error = %error, "Rejected progression input");
    })?;
    let summary = state.summary();

    debug!(
        xp_total,
        level = summary.level,
        xp_to_next = summary.xp_to_next,
        progress_pct = summary.progress_pct,
        "Computed progress summary"
    );

    Ok(summary)
}

/// Compute summaries for many accounts in parallel
///
/// Leaderboards and share-card batches call this; the calculator holds no
/// state so the work splits freely across the rayon pool.
#[must_use]
pub fn compute_batch(states: &[ExperienceState]) -> Vec<ProgressSummary> {
    states.par_iter().map(ExperienceState::summary).collect()
}

/// XP total at which `level` begins
///
/// # Errors
///
/// Returns `ErrorCode::InvalidInput` for level 0 or a non-positive level
/// cost, and `ErrorCode::ValueOutOfRange` if the threshold overflows.
pub fn xp_threshold(level: u64, xp_per_level: i64) -> AppResult<u64> {
    let per_level = ExperienceState::initial(xp_per_level)?.xp_per_level();
    let completed_levels = level
        .checked_sub(leveling::FIRST_LEVEL)
        .ok_or_else(|| AppError::invalid_input("Levels start at 1"))?;

    completed_levels
        .checked_mul(per_level)
        .ok_or_else(|| AppError::out_of_range(format!("Threshold for level {level} overflows")))
}

fn validated_total(xp_total: i64) -> AppResult<u64> {
    u64::try_from(xp_total).map_err(|_| {
        AppError::invalid_input(format!("xpTotal must be non-negative, got {xp_total}"))
            .with_details(json!({ "field": payload_fields::XP_TOTAL, "value": xp_total }))
    })
}

/// Read an optional integer field from a JSON object
pub(crate) fn integer_field(payload: &Value, field: &str) -> AppResult<Option<i64>> {
    present(payload, field)
        .map(|value| {
            integer_value(value).ok_or_else(|| AppError::invalid_format(field, "a 64-bit integer"))
        })
        .transpose()
}

/// Look up a field under its backend name or its alias
///
/// An explicit `null` counts as absent, so a null backend field still
/// falls through to the alias. Returns the key that matched.
pub(crate) fn field_or_alias<'a>(
    payload: &'a Value,
    field: &'static str,
    alias: &'static str,
) -> Option<(&'static str, &'a Value)> {
    present(payload, field)
        .map(|value| (field, value))
        .or_else(|| present(payload, alias).map(|value| (alias, value)))
}

/// Field value, treating an explicit `null` as absent
pub(crate) fn present<'a>(payload: &'a Value, field: &str) -> Option<&'a Value> {
    payload.get(field).filter(|value| !value.is_null())
}

/// Interpret a JSON number as an `i64`, accepting integral floats
#[allow(clippy::float_cmp)]
pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }

    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (in_range && float.trunc() == float).then_some(float as i64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use siccus_core::ErrorCode;

    #[test]
    fn test_zero_xp_is_level_one() {
        let summary = compute_summary(0, 100).unwrap();
        assert_eq!(summary.level, 1);
        assert_eq!(summary.next_level, 2);
        assert_eq!(summary.xp_for_current_level_start, 0);
        assert_eq!(summary.xp_for_next_level, 100);
        assert_eq!(summary.xp_into_level, 0);
        assert_eq!(summary.xp_to_next, 100);
        assert_eq!(summary.progress_pct, 0.0);
    }

    #[test]
    fn test_mid_level() {
        let summary = compute_summary(45, 100).unwrap();
        assert_eq!(summary.level, 1);
        assert_eq!(summary.xp_into_level, 45);
        assert_eq!(summary.xp_to_next, 55);
        assert_eq!(summary.progress_pct, 45.0);
    }

    #[test]
    fn test_threshold_belongs_to_new_level() {
        let summary = compute_summary(300, 100).unwrap();
        assert_eq!(summary.level, 4);
        assert_eq!(summary.xp_into_level, 0);
        assert_eq!(summary.progress_pct, 0.0);
        assert!(summary.is_level_start());
    }

    #[test]
    fn test_last_point_before_level_up() {
        let summary = compute_summary(199, 100).unwrap();
        assert_eq!(summary.level, 2);
        assert_eq!(summary.xp_into_level, 99);
        assert_eq!(summary.xp_to_next, 1);
        assert_eq!(summary.progress_pct, 99.0);
    }

    #[test]
    fn test_rejects_negative_total() {
        let error = compute_summary(-1, 100).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_rejects_non_positive_cost() {
        assert_eq!(
            compute_summary(50, 0).unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            compute_summary(50, -100).unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn test_max_total_does_not_wrap() {
        let summary = compute_summary(i64::MAX, i64::MAX).unwrap();
        assert_eq!(summary.level, 2);
        assert_eq!(summary.xp_into_level, 0);
        assert_eq!(summary.xp_for_next_level, 2 * i64::MAX.unsigned_abs());

        let summary = compute_summary(i64::MAX, 1).unwrap();
        assert_eq!(summary.level, i64::MAX.unsigned_abs() + 1);
        assert_eq!(summary.xp_to_next, 1);
    }

    #[test]
    fn test_add_xp_overflow() {
        let state = ExperienceState::new(i64::MAX - 1, 100).unwrap();
        assert!(state.add_xp(1).is_ok());
        let error = state.add_xp(2).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_from_json_defaults_cost() {
        let state = ExperienceState::from_json(&json!({ "xpTotal": 1450 }), 100).unwrap();
        assert_eq!(state.xp_total(), 1450);
        assert_eq!(state.xp_per_level(), 100);
    }

    #[test]
    fn test_from_json_accepts_integral_float() {
        let state =
            ExperienceState::from_json(&json!({ "xpTotal": 250.0, "xpPerLevel": 50 }), 100)
                .unwrap();
        assert_eq!(state.summary().level, 6);
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        for payload in [
            json!({}),
            json!({ "xpTotal": null }),
            json!({ "xpTotal": "1450" }),
            json!({ "xpTotal": 12.5 }),
            json!({ "xpTotal": true }),
            json!({ "xpTotal": 10, "xpPerLevel": "100" }),
            json!([1450]),
        ] {
            let error = ExperienceState::from_json(&payload, 100).unwrap_err();
            assert_eq!(error.code, ErrorCode::InvalidInput, "payload {payload}");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let state: ExperienceState =
            serde_json::from_str(r#"{"xpTotal": 120, "xpPerLevel": 40}"#).unwrap();
        assert_eq!(state.summary().level, 4);

        assert!(serde_json::from_str::<ExperienceState>(r#"{"xpTotal": -5}"#).is_err());
        assert!(serde_json::from_str::<ExperienceState>(r#"{"xpTotal": 5, "xpPerLevel": 0}"#).is_err());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(compute_summary(100, 100).unwrap()).unwrap();
        assert_eq!(value["level"], 2);
        assert_eq!(value["xpForCurrentLevelStart"], 100);
        assert_eq!(value["xpForNextLevel"], 200);
        assert_eq!(value["xpIntoLevel"], 0);
        assert_eq!(value["xpToNext"], 100);
        assert_eq!(value["progressPct"], 0.0);
    }

    #[test]
    fn test_xp_threshold() {
        assert_eq!(xp_threshold(1, 100).unwrap(), 0);
        assert_eq!(xp_threshold(15, 100).unwrap(), 1400);
        assert_eq!(xp_threshold(0, 100).unwrap_err().code, ErrorCode::InvalidInput);
        assert_eq!(
            xp_threshold(u64::MAX, 100).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_with_total_keeps_cost() {
        let state = ExperienceState::new(900, 250).unwrap();

        let moved = state.with_total(1000).unwrap();
        assert_eq!(moved.xp_per_level(), 250);
        assert_eq!(moved.summary().level, 5);
        assert_eq!(state.with_total(-1).unwrap_err().code, ErrorCode::InvalidInput);

        assert_eq!(state.signed_xp_per_level(), 250);

        let cleared = state.cleared();
        assert_eq!(cleared.xp_total(), 0);
        assert_eq!(cleared.xp_per_level(), 250);
    }

    #[test]
    fn test_null_field_falls_through_to_alias() {
        let payload = json!({ "nivel": null, "level": 12 });
        let (key, value) = field_or_alias(&payload, "nivel", "level").unwrap();
        assert_eq!(key, "level");
        assert_eq!(value, &json!(12));

        assert!(field_or_alias(&json!({ "nivel": null }), "nivel", "level").is_none());
    }

    #[test]
    fn test_batch_matches_single() {
        let states: Vec<ExperienceState> = (0..500)
            .map(|xp| ExperienceState::new(xp * 7, 60).unwrap())
            .collect();
        let batch = compute_batch(&states);
        for (state, summary) in states.iter().zip(&batch) {
            assert_eq!(*summary, state.summary());
        }
    }
}
