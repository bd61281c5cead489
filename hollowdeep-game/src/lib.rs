//! Hollowdeep Battle Engine
//!
//! Platform-agnostic boss-encounter core for the Hollowdeep dungeon crawler.
//! This crate provides the full decision/resolution/transition logic of the
//! warden fight without UI or platform-specific dependencies: callers supply
//! the player entity and the per-round input, and consume the structured
//! narration events the loop emits.

pub mod action;
pub mod battle;
pub mod config;
pub mod constants;
pub mod context;
pub mod event;
pub mod phase;
pub mod resolve;
pub mod rng;
pub mod summary;

// Re-export commonly used types
pub use action::{Action, PlayerCommand, parse_player_command};
pub use battle::{ActionSource, Battle, BattleOutcome, BattleView, run_battle};
pub use config::{ConfigError, EncounterConfig};
pub use context::{BattleContext, Player};
pub use event::{
    ActionDecisionTrace, BattleEvent, BattleEventKind, EventId, EventSeverity, EventTag,
    EventTagSet, WeightedAction,
};
pub use phase::BossPhase;
pub use resolve::{Resolution, ResolutionRule, clash_damage, resolve_round};
pub use rng::{BattleRng, CountingRng};
pub use summary::{BattleSummary, outcome_ui_key};
