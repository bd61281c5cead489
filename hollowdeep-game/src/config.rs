//! Encounter tuning loaded from static data.

use crate::action::Action;
use crate::constants::{BOSS_MAX_HP, DEMO_HIT_MAX, DEMO_HIT_MIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ENCOUNTER_DATA: &str = include_str!("../assets/data/encounter.json");

/// Tuning for one boss encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    #[serde(default = "EncounterConfig::default_boss_max_hp")]
    pub boss_max_hp: i32,
    #[serde(default = "EncounterConfig::default_demo_hit_min")]
    pub demo_hit_min: i32,
    #[serde(default = "EncounterConfig::default_demo_hit_max")]
    pub demo_hit_max: i32,
    /// Action input collaborators substitute for unrecognized input.
    #[serde(default = "EncounterConfig::default_fallback_command")]
    pub fallback_command: Action,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        serde_json::from_str(DEFAULT_ENCOUNTER_DATA).unwrap_or(Self {
            boss_max_hp: BOSS_MAX_HP,
            demo_hit_min: DEMO_HIT_MIN,
            demo_hit_max: DEMO_HIT_MAX,
            fallback_command: Action::Attack,
        })
    }
}

impl EncounterConfig {
    const fn default_boss_max_hp() -> i32 {
        BOSS_MAX_HP
    }

    const fn default_demo_hit_min() -> i32 {
        DEMO_HIT_MIN
    }

    const fn default_demo_hit_max() -> i32 {
        DEMO_HIT_MAX
    }

    const fn default_fallback_command() -> Action {
        Action::Attack
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boss_max_hp < 1 {
            return Err(ConfigError::MinViolation {
                field: "boss_max_hp",
                min: 1,
                value: self.boss_max_hp,
            });
        }
        if self.demo_hit_min < 0 {
            return Err(ConfigError::MinViolation {
                field: "demo_hit_min",
                min: 0,
                value: self.demo_hit_min,
            });
        }
        if self.demo_hit_max < self.demo_hit_min {
            return Err(ConfigError::DemoHitBounds {
                min: self.demo_hit_min,
                max: self.demo_hit_max,
            });
        }
        Ok(())
    }
}

/// Errors raised when encounter configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: i32,
        value: i32,
    },
    #[error("demo hit bounds invalid (min {min} > max {max})")]
    DemoHitBounds { min: i32, max: i32 },
}
