//! Post-battle result summary for the presentation layer.

use crate::battle::BattleOutcome;
use crate::constants::{LOG_DEFEAT, LOG_FLED, LOG_VICTORY};
use crate::phase::BossPhase;
use serde::{Deserialize, Serialize};

/// Complete summary of one encounter for the result surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    pub rounds: u32,
    pub final_phase: BossPhase,
    pub boss_hp_remaining: i32,
    pub damage_to_boss: i32,
    pub damage_to_player: i32,
    /// i18n headline key for the outcome.
    pub ui_key: String,
}

/// i18n headline key for an outcome.
#[must_use]
pub fn outcome_ui_key(outcome: BattleOutcome) -> &'static str {
    match outcome {
        BattleOutcome::Won => LOG_VICTORY,
        BattleOutcome::Lost => LOG_DEFEAT,
        BattleOutcome::Fled => LOG_FLED,
    }
}
