// ABOUTME: Achievement catalog entries, per-achievement progress, and unlocked XP totals
// ABOUTME: Category filtering and rarity tallies for the achievements screen

use crate::errors::{AppError, AppResult};
use crate::percent::{clamp_percent, ratio_percent};
use serde::{Deserialize, Serialize};
use siccus_core::constants::percent as percent_bounds;

/// Achievement grouping shown as filter tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Workout routines
    Exercise,
    /// Daily habits such as hydration or sleep
    Habits,
    /// Consecutive-day streaks
    Streaks,
    /// Account milestones
    Milestones,
}

/// How rare an achievement is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Most users unlock it
    Common,
    /// Takes sustained effort
    Rare,
    /// Takes weeks of effort
    Epic,
    /// Long-term goal
    Legendary,
}

impl Rarity {
    /// All rarities, most common first
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];
}

/// Achievement with optional counter-based progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Filter category
    pub category: AchievementCategory,
    /// Rarity
    pub rarity: Rarity,
    /// XP granted on unlock
    pub xp: u64,
    /// Whether the achievement is unlocked
    pub unlocked: bool,
    /// Counter value, for achievements like "complete 10 routines"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    /// Counter target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u64>,
}

impl Achievement {
    /// Progress toward unlocking, in `[0, 100]`
    ///
    /// Unlocked achievements read 100; locked ones without a counter read 0.
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        if self.unlocked {
            return percent_bounds::MAX;
        }
        match (self.current, self.target) {
            (Some(current), Some(target)) => ratio_percent(current, target),
            _ => clamp_percent(None),
        }
    }
}

/// XP granted by unlocked achievements
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` if the sum overflows `u64`.
pub fn unlocked_xp(achievements: &[Achievement]) -> AppResult<u64> {
    achievements
        .iter()
        .filter(|achievement| achievement.unlocked)
        .try_fold(0_u64, |total, achievement| {
            total.checked_add(achievement.xp).ok_or_else(|| {
                AppError::out_of_range(format!(
                    "Unlocked XP overflows at achievement '{}'",
                    achievement.id
                ))
            })
        })
}

/// Achievements in a category; `None` selects all
#[must_use]
pub fn filter_by_category(
    achievements: &[Achievement],
    category: Option<AchievementCategory>,
) -> Vec<&Achievement> {
    achievements
        .iter()
        .filter(|achievement| category.is_none_or(|c| achievement.category == c))
        .collect()
}

/// Unlocked/total count for one rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RarityTally {
    /// Rarity counted
    pub rarity: Rarity,
    /// Unlocked achievements of this rarity
    pub unlocked: usize,
    /// All achievements of this rarity
    pub total: usize,
}

/// Unlocked/total counts for every rarity, most common first
#[must_use]
pub fn rarity_tally(achievements: &[Achievement]) -> Vec<RarityTally> {
    Rarity::ALL
        .iter()
        .map(|&rarity| {
            let of_rarity = achievements.iter().filter(|a| a.rarity == rarity);
            RarityTally {
                rarity,
                unlocked: of_rarity.clone().filter(|a| a.unlocked).count(),
                total: of_rarity.count(),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn achievement(
        id: &str,
        category: AchievementCategory,
        rarity: Rarity,
        xp: u64,
        unlocked: bool,
    ) -> Achievement {
        Achievement {
            id: id.to_owned(),
            title: id.to_owned(),
            category,
            rarity,
            xp,
            unlocked,
            current: None,
            target: None,
        }
    }

    fn catalog() -> Vec<Achievement> {
        vec![
            achievement("first_session", AchievementCategory::Exercise, Rarity::Common, 50, true),
            Achievement {
                current: Some(4),
                target: Some(10),
                ..achievement("exercise_warrior", AchievementCategory::Exercise, Rarity::Rare, 200, false)
            },
            achievement("hydration", AchievementCategory::Habits, Rarity::Common, 25, true),
            achievement("week_streak", AchievementCategory::Streaks, Rarity::Rare, 150, true),
            achievement("legend", AchievementCategory::Milestones, Rarity::Legendary, 1000, false),
        ]
    }

    #[test]
    fn test_progress_pct() {
        let catalog = catalog();
        assert_eq!(catalog[0].progress_pct(), 100.0);
        assert_eq!(catalog[1].progress_pct(), 40.0);
        assert_eq!(catalog[4].progress_pct(), 0.0);
    }

    #[test]
    fn test_overshooting_counter_is_clamped() {
        let overshoot = Achievement {
            current: Some(15),
            target: Some(10),
            ..achievement("x", AchievementCategory::Habits, Rarity::Common, 1, false)
        };
        assert_eq!(overshoot.progress_pct(), 100.0);
    }

    #[test]
    fn test_unlocked_xp() {
        assert_eq!(unlocked_xp(&catalog()).unwrap(), 225);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = catalog();
        assert_eq!(filter_by_category(&catalog, None).len(), 5);
        assert_eq!(
            filter_by_category(&catalog, Some(AchievementCategory::Exercise)).len(),
            2
        );
    }

    #[test]
    fn test_rarity_tally() {
        let tally = rarity_tally(&catalog());
        assert_eq!(
            tally[1],
            RarityTally {
                rarity: Rarity::Rare,
                unlocked: 1,
                total: 2
            }
        );
        assert_eq!(tally[2].total, 0);
    }

    #[test]
    fn test_deserializes_catalog_entry() {
        let entry: Achievement = serde_json::from_str(
            r#"{"id":"2","title":"Guerrero","category":"exercise","rarity":"rare","xp":200,"unlocked":false,"current":4,"target":10}"#,
        )
        .unwrap();
        assert_eq!(entry.rarity, Rarity::Rare);
        assert_eq!(entry.progress_pct(), 40.0);
    }
}
