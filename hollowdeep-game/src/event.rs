//! Structured narration events emitted by the battle loop.
//!
//! The core performs no screen I/O. Every observable moment of an encounter
//! is pushed into an event stream the presentation layer renders however it
//! likes. Events carry i18n log keys as `ui_key` hints while `kind` remains
//! a mechanical descriptor.

use crate::action::Action;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum tag capacity stored inline without additional allocations.
pub type EventTagSet = SmallVec<[EventTag; 4]>;

/// Tag describing a mechanical detail of an event (`clash`, `demo`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTag(pub String);

impl EventTag {
    /// Construct a tag from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

/// Stable, deterministic identifier for a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// One-based round counter when the event occurred.
    pub round: u32,
    /// Per-round sequence number (0-based) within the emitted stream.
    pub seq: u16,
}

impl EventId {
    #[must_use]
    pub const fn new(round: u32, seq: u16) -> Self {
        Self { round, seq }
    }
}

/// Mechanical event kind emitted by the battle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleEventKind {
    PhaseEntered,
    BossActionChosen,
    RoundResolved,
    PhaseShifted,
    BattleEnded,
}

/// Severity tier for a battle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Info,
    Warning,
    Critical,
}

/// Structured event emitted by the battle loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub id: EventId,
    /// One-based round counter when the event occurred.
    pub round: u32,
    pub kind: BattleEventKind,
    pub severity: EventSeverity,
    /// Stable tags describing the event (e.g., `clash`, `fallback`, `demo`).
    #[serde(default)]
    pub tags: EventTagSet,
    /// Optional i18n key for presentation-layer rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_key: Option<String>,
    /// Optional structured payload for debugging and downstream rendering.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

/// Explainability telemetry for one weighted boss-action draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDecisionTrace {
    /// Identifier for the selection pool (e.g., `hollowdeep.boss.angry`).
    pub pool_id: String,
    /// Random draw used to select from the weighted pool.
    pub roll: u32,
    /// Candidate weights considered during selection, in listed order.
    pub candidates: Vec<WeightedAction>,
    /// The selected action.
    pub chosen: Action,
}

/// Candidate weight captured during action selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedAction {
    pub action: Action,
    pub weight: u32,
}
