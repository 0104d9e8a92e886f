// ABOUTME: XP progression engine for the Siccus gamified wellness platform
// ABOUTME: Leveling calculator, percent clamping, vitals, missions, achievements, and tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

#![deny(unsafe_code)]

//! # Siccus Progression
//!
//! Converts a cumulative experience total into the level/progress summary
//! rendered by the dashboard, achievements and share-card views. Every
//! computation is pure: the same `xpTotal` and `xpPerLevel` always produce
//! the same summary, so callers on any thread can share the functions
//! without coordination.
//!
//! ## Modules
//!
//! - **calculator**: `ExperienceState`, `ProgressSummary`, `compute_summary`
//! - **percent**: `clamp_percent` and ratio helpers for progress bars
//! - **vitals**: energy/health pass-through stats
//! - **report**: flat dashboard report and backend payload reconciliation
//! - **missions**: mission status, earned XP and level-up projection
//! - **achievements**: achievement progress and unlocked XP
//! - **tracker**: explicit last-known-good progress state
//! - **config**: progression configuration loaded from the environment

/// Errors reuse the core crate's unified error type
pub use siccus_core::errors;

/// Level, XP-into-level and progress percentage computation
pub mod calculator;

/// Percentage clamping for progress bars and vitals
pub mod percent;

/// Energy and health stats
pub mod vitals;

/// Dashboard report and backend reconciliation
pub mod report;

/// Mission XP aggregation and level-up projection
pub mod missions;

/// Achievement progress and XP totals
pub mod achievements;

/// Last-known-good progress state
pub mod tracker;

/// Progression configuration
pub mod config;

pub use calculator::{compute_batch, compute_summary, xp_threshold, ExperienceState, ProgressSummary};
pub use config::{ConfigError, DriftPolicy, ProgressionConfig};
pub use percent::clamp_percent;
pub use report::{Drift, ProgressReport, Reconciliation};
pub use tracker::ProgressTracker;
pub use vitals::Vitals;
