// ABOUTME: Main library entry point for the Siccus progression engine
// ABOUTME: Re-exports the core and progression crates and provides logging setup for binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

#![deny(unsafe_code)]

//! # Siccus
//!
//! XP leveling and progress summaries for the Siccus gamified wellness app.
//! A user's cumulative experience total is turned into the level, XP into
//! the level, XP to the next level and a progress-bar percentage, the same
//! way on every screen.
//!
//! ## Architecture
//!
//! - **`siccus_core`**: unified error types and constants
//! - **`siccus_progression`**: pure leveling algorithms, backend report
//!   reconciliation, missions, achievements and the progress tracker
//! - **logging**: `tracing-subscriber` setup used by the `siccus-cli` binary
//!
//! ## Example Usage
//!
//! ```rust
//! use siccus::progression::compute_summary;
//! use siccus::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let summary = compute_summary(1450, 100)?;
//!     assert_eq!(summary.level, 15);
//!     assert_eq!(summary.xp_to_next, 50);
//!     Ok(())
//! }
//! ```

/// Structured logging setup
pub mod logging;

/// Unified error handling re-exported from the core crate
pub use siccus_core::errors;

/// Domain constants re-exported from the core crate
pub use siccus_core::constants;

/// Progression algorithms re-exported from the progression crate
pub use siccus_progression as progression;
