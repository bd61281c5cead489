//! Combat actions shared by the player and the boss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete choice made by either combatant each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Defend,
    Magic,
    Counter,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Attack, Self::Defend, Self::Magic, Self::Counter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Magic => "magic",
            Self::Counter => "counter",
        }
    }

    /// Whether the action can hurt the boss on its own.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        !matches!(self, Self::Defend)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attack" => Ok(Self::Attack),
            "defend" => Ok(Self::Defend),
            "magic" => Ok(Self::Magic),
            "counter" => Ok(Self::Counter),
            _ => Err(()),
        }
    }
}

impl From<Action> for String {
    fn from(value: Action) -> Self {
        value.as_str().to_string()
    }
}

/// What the input collaborator hands the battle loop each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerCommand {
    Act(Action),
    Flee,
}

/// Map raw player input to a command, substituting `fallback` for anything
/// unrecognized. Input collaborators own this mapping; the loop itself only
/// ever sees valid commands.
#[must_use]
pub fn parse_player_command(raw: &str, fallback: Action) -> PlayerCommand {
    let token = raw.trim().to_ascii_lowercase();
    match token.as_str() {
        "attack" | "a" => PlayerCommand::Act(Action::Attack),
        "defend" | "d" => PlayerCommand::Act(Action::Defend),
        "magic" | "m" => PlayerCommand::Act(Action::Magic),
        "counter" | "c" => PlayerCommand::Act(Action::Counter),
        "flee" | "f" | "run" => PlayerCommand::Flee,
        _ => PlayerCommand::Act(fallback),
    }
}
