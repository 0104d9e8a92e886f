// ABOUTME: Energy and health stats shown next to the avatar on the dashboard
// ABOUTME: Independent of XP; supplied externally and clamped to 0-100 on read

use crate::calculator::field_or_alias;
use crate::percent::clamp_percent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use siccus_core::constants::payload_fields;

/// Energy and health, each in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vitals {
    /// Energy bar value
    pub energy: f64,
    /// Health bar value
    pub health: f64,
}

impl Vitals {
    /// Build from raw, possibly missing values
    #[must_use]
    pub fn new(energy: Option<f64>, health: Option<f64>) -> Self {
        Self {
            energy: clamp_percent(energy),
            health: clamp_percent(health),
        }
    }

    /// Read vitals from a backend progress payload
    ///
    /// Prefers `energiaTotal`/`saludTotal` and falls back to the
    /// `energyTotal`/`healthTotal` aliases. Nulls and non-numeric values
    /// read as missing.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        let read = |field, alias| {
            field_or_alias(payload, field, alias).and_then(|(_, value)| value.as_f64())
        };

        Self::new(
            read(
                payload_fields::ENERGY_TOTAL,
                payload_fields::ENERGY_TOTAL_ALIAS,
            ),
            read(
                payload_fields::HEALTH_TOTAL,
                payload_fields::HEALTH_TOTAL_ALIAS,
            ),
        )
    }
}
