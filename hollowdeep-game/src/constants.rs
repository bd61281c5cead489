//! Centralized balance and log-key constants for Hollowdeep battle logic.
//!
//! These values define the deterministic math for the encounter core.
//! Keeping them together ensures balance can only be adjusted via code
//! changes reviewed in version control, rather than scattered literals.

// Logging keys -------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "HOLLOWDEEP_DEBUG_LOGS";
pub(crate) const LOG_PHASE_NORMAL: &str = "log.battle.phase.normal";
pub(crate) const LOG_PHASE_ANGRY: &str = "log.battle.phase.angry";
pub(crate) const LOG_PHASE_DEFENSIVE: &str = "log.battle.phase.defensive";
pub(crate) const LOG_PHASE_ENRAGED: &str = "log.battle.phase.enraged";
pub(crate) const LOG_PHASE_SHIFT: &str = "log.battle.phase.shift";
pub(crate) const LOG_BOSS_ACTION: &str = "log.battle.boss-action";
pub(crate) const LOG_CLASH: &str = "log.battle.clash";
pub(crate) const LOG_PLAYER_HIT: &str = "log.battle.player-hit";
pub(crate) const LOG_BOSS_HIT: &str = "log.battle.boss-hit";
pub(crate) const LOG_TUTORIAL_HIT: &str = "log.battle.tutorial-hit";
pub(crate) const LOG_VICTORY: &str = "log.battle.victory";
pub(crate) const LOG_DEFEAT: &str = "log.battle.defeat";
pub(crate) const LOG_FLED: &str = "log.battle.fled";

// Boss tuning --------------------------------------------------------------
pub(crate) const BOSS_MAX_HP: i32 = 200;
pub(crate) const ACTION_ROLL_SPAN: u32 = 100;
pub(crate) const DEFEND_DAMAGE_DIVISOR: i32 = 2;

// Phase thresholds (boss HP fraction at or below which the phase gives way)
pub(crate) const ANGRY_THRESHOLD: f32 = 0.75;
pub(crate) const DEFENSIVE_THRESHOLD: f32 = 0.50;
pub(crate) const ENRAGED_THRESHOLD: f32 = 0.25;

// Demo/tutorial tuning -----------------------------------------------------
pub(crate) const DEMO_HIT_MIN: i32 = 20;
pub(crate) const DEMO_HIT_MAX: i32 = 30;
