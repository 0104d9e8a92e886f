// ABOUTME: Daily mission records, earned XP aggregation, and level-up projection
// ABOUTME: Maps the backend mission-assignment shape and predicts progress after completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Missions assigned to a user.
//!
//! The backend stores assignments with Spanish field names; serde renames
//! keep the Rust side readable while accepting the wire payload unchanged.

use crate::calculator::{ExperienceState, ProgressSummary};
use crate::errors::{AppError, AppResult};
use crate::percent::{clamp_percent, ratio_percent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siccus_core::constants::percent as percent_bounds;
use tracing::debug;

/// Lifecycle of an assigned mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissionStatus {
    /// Assigned, not started
    #[default]
    #[serde(rename = "PENDIENTE")]
    Pending,
    /// Started
    #[serde(rename = "EN_PROGRESO")]
    InProgress,
    /// Done; its XP counts toward the total
    #[serde(rename = "COMPLETADA")]
    Completed,
}

impl MissionStatus {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDIENTE",
            Self::InProgress => "EN_PROGRESO",
            Self::Completed => "COMPLETADA",
        }
    }

    /// Parse the wire representation, accepting English aliases
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDIENTE" | "PENDING" => Some(Self::Pending),
            "EN_PROGRESO" | "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETADA" | "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Status after the user taps the mission's checkbox
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Pending | Self::InProgress => Self::Completed,
        }
    }
}

/// Catalog entry for a mission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// Catalog identifier
    #[serde(rename = "id_mision")]
    pub id: u64,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Optional description
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// XP awarded on completion
    pub xp: u64,
}

/// Mission assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedMission {
    /// Assignment identifier
    #[serde(rename = "id_mision_usuario")]
    pub id: u64,
    /// Owning user
    #[serde(rename = "id_usuario")]
    pub user_id: u64,
    /// Catalog mission identifier
    #[serde(rename = "id_mision")]
    pub mission_id: u64,
    /// Current status
    #[serde(rename = "estado")]
    pub status: MissionStatus,
    /// Optional partial progress reported by the client
    #[serde(rename = "progreso", default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Completion timestamp
    #[serde(rename = "completada_at", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Embedded catalog entry; absent when the backend join failed
    #[serde(rename = "mision", default)]
    pub mission: Option<Mission>,
}

impl AssignedMission {
    /// XP this mission is worth, `0` when the catalog entry is missing
    #[must_use]
    pub fn xp(&self) -> u64 {
        self.mission.as_ref().map_or(0, |mission| mission.xp)
    }

    /// Whether the mission counts toward earned XP
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MissionStatus::Completed
    }

    /// Displayed progress bar value
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        if self.is_completed() {
            return percent_bounds::MAX;
        }
        clamp_percent(self.progress)
    }
}

/// Total XP of completed missions
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` if the sum overflows `u64`.
pub fn earned_xp(missions: &[AssignedMission]) -> AppResult<u64> {
    missions
        .iter()
        .filter(|mission| mission.is_completed())
        .try_fold(0_u64, |total, mission| {
            total.checked_add(mission.xp()).ok_or_else(|| {
                AppError::out_of_range(format!(
                    "Earned XP overflows after mission {}",
                    mission.id
                ))
            })
        })
}

/// Number of completed missions
#[must_use]
pub fn completed_count(missions: &[AssignedMission]) -> usize {
    missions.iter().filter(|mission| mission.is_completed()).count()
}

/// Share of missions completed, as a percentage
#[must_use]
pub fn completion_percent(missions: &[AssignedMission]) -> f64 {
    ratio_percent(completed_count(missions) as u64, missions.len() as u64)
}

/// Progress before and after completing a mission
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionOutcome {
    /// Summary before the XP is awarded
    pub before: ProgressSummary,
    /// Summary after the XP is awarded
    pub after: ProgressSummary,
    /// Number of level thresholds crossed
    pub levels_gained: u64,
}

impl CompletionOutcome {
    /// Whether completing the mission crosses at least one threshold
    #[must_use]
    pub const fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Predict the summary after completing a mission worth `mission_xp`
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` if the new total exceeds the
/// supported XP range.
pub fn project_completion(state: ExperienceState, mission_xp: u64) -> AppResult<CompletionOutcome> {
    let before = state.summary();
    let after = state.add_xp(mission_xp)?.summary();
    let levels_gained = after.levels_gained_since(&before);

    debug!(
        mission_xp,
        level_before = before.level,
        level_after = after.level,
        levels_gained,
        "Projected mission completion"
    );

    Ok(CompletionOutcome {
        before,
        after,
        levels_gained,
    })
}
