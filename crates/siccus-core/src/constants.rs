// ABOUTME: Progression constants for XP leveling, percent bounds, and configuration keys
// ABOUTME: Pure data constants grouped by domain, shared by the calculator, CLI, and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// XP leveling defaults
pub mod leveling {
    /// Flat XP cost of a single level used by the mobile and web clients
    pub const DEFAULT_XP_PER_LEVEL: i64 = 100;

    /// Level every account starts at
    pub const FIRST_LEVEL: u64 = 1;
}

/// Percentage bounds for progress bars and vitals
pub mod percent {
    /// Lower bound of any displayed percentage
    pub const MIN: f64 = 0.0;

    /// Upper bound of any displayed percentage
    pub const MAX: f64 = 100.0;

    /// Largest representable value strictly below `MAX`.
    ///
    /// Progress inside a level must never read as a full bar, even when the
    /// float division rounds up for very large level costs.
    pub const BELOW_FULL: f64 = 99.999_999_999_999_99;
}

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// XP cost of a single level
    pub const XP_PER_LEVEL: &str = "SICCUS_XP_PER_LEVEL";

    /// How backend summaries that disagree with the local computation are resolved
    pub const DRIFT_POLICY: &str = "SICCUS_DRIFT_POLICY";
}

/// Service identification for structured logging
pub mod service_names {
    /// Default service name
    pub const SICCUS: &str = "siccus";

    /// Command-line tool
    pub const SICCUS_CLI: &str = "siccus-cli";
}

/// JSON field names of the backend progress payload
///
/// The summary endpoint speaks Spanish for the level and vitals; the
/// English spellings are only aliases read on input.
pub mod payload_fields {
    /// Cumulative XP
    pub const XP_TOTAL: &str = "xpTotal";
    /// XP cost of one level
    pub const XP_PER_LEVEL: &str = "xpPerLevel";
    /// Energy stat
    pub const ENERGY_TOTAL: &str = "energiaTotal";
    /// English spelling of the energy stat accepted on input
    pub const ENERGY_TOTAL_ALIAS: &str = "energyTotal";
    /// Health stat
    pub const HEALTH_TOTAL: &str = "saludTotal";
    /// English spelling of the health stat accepted on input
    pub const HEALTH_TOTAL_ALIAS: &str = "healthTotal";
    /// Current level
    pub const LEVEL: &str = "nivel";
    /// English spelling of the current level accepted on input
    pub const LEVEL_ALIAS: &str = "level";
    /// Next level
    pub const NEXT_LEVEL: &str = "nextLevel";
    /// XP at which the current level starts
    pub const XP_FOR_CURRENT_LEVEL_START: &str = "xpForCurrentLevelStart";
    /// XP at which the next level starts
    pub const XP_FOR_NEXT_LEVEL: &str = "xpForNextLevel";
    /// XP earned inside the current level
    pub const XP_INTO_LEVEL: &str = "xpIntoLevel";
    /// XP missing for the next level
    pub const XP_TO_NEXT: &str = "xpToNext";
    /// Percent of the current level completed
    pub const PROGRESS_PCT: &str = "progressPct";
}
