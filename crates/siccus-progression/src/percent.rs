// ABOUTME: Percentage clamping for progress bars, vitals, and completion ratios
// ABOUTME: Maps missing, NaN, and out-of-range values into the displayable 0-100 range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

use siccus_core::constants::percent::{BELOW_FULL, MAX, MIN};

/// Clamp a display percentage into `[0, 100]`
///
/// Upstream sources (mock data, partially initialised state) may supply
/// nothing, `NaN` or out-of-range values. Missing and `NaN` become `0`.
///
/// This is for display-only stats such as energy and health. XP totals are
/// validated by the calculator instead of being clamped.
#[must_use]
pub fn clamp_percent(value: Option<f64>) -> f64 {
    match value {
        Some(value) if !value.is_nan() => value.clamp(MIN, MAX),
        _ => MIN,
    }
}

/// `part / whole` as a clamped percentage, `0` when `whole` is zero
#[must_use]
pub fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return MIN;
    }
    clamp_percent(Some(part as f64 * MAX / whole as f64))
}

/// Percent of a level completed
///
/// Stays strictly below 100 while `xp_into_level < xp_per_level`, even when
/// float rounding for huge level costs would otherwise reach 100.
pub(crate) fn level_progress(xp_into_level: u64, xp_per_level: u64) -> f64 {
    let pct = xp_into_level as f64 * MAX / xp_per_level as f64;
    if pct >= MAX && xp_into_level < xp_per_level {
        BELOW_FULL
    } else {
        pct
    }
}
