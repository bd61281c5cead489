//! Per-phase action resolution tables and the generic resolver.
//!
//! Each phase's rules are plain data: a clash constant, explicit
//! player-wins and boss-wins pairs, and a fallback hit on the player.
//! `resolve_round` walks them in precedence order and returns a pure
//! outcome; applying damage is the battle loop's job.

use crate::action::Action;
use crate::action::Action::{Attack, Counter, Defend, Magic};
use crate::phase::BossPhase;
use serde::{Deserialize, Serialize};

/// Which rule decided a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    Clash,
    PlayerWins,
    BossWins,
    Fallback,
}

/// Damage decided for one round, before the defend mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub rule: ResolutionRule,
    pub damage_to_boss: i32,
    pub damage_to_player: i32,
}

struct ResolutionTable {
    clash_damage: i32,
    /// (player action, boss action) -> damage to the boss; first match wins.
    player_wins: &'static [(Action, Action, i32)],
    /// (boss action, player action) -> damage to the player.
    boss_wins: &'static [(Action, Action, i32)],
    /// Damage to the player when no explicit pair matches.
    fallback_damage: i32,
}

// Counter punishes every distinct boss action in the opening phase, on both
// sides of the table; the Counter/Counter cell is the clash rule.
static NORMAL: ResolutionTable = ResolutionTable {
    clash_damage: 10,
    player_wins: &[
        (Counter, Attack, 40),
        (Counter, Defend, 40),
        (Counter, Magic, 40),
        (Attack, Magic, 25),
        (Magic, Defend, 30),
        (Defend, Attack, 15),
    ],
    boss_wins: &[
        (Counter, Attack, 40),
        (Counter, Defend, 40),
        (Counter, Magic, 40),
    ],
    fallback_damage: 25,
};

static ANGRY: ResolutionTable = ResolutionTable {
    clash_damage: 15,
    player_wins: &[
        (Attack, Defend, 35),
        (Magic, Counter, 35),
        (Defend, Magic, 20),
        (Counter, Attack, 50),
    ],
    boss_wins: &[
        (Attack, Defend, 35),
        (Magic, Counter, 35),
        (Defend, Magic, 20),
        (Counter, Attack, 50),
    ],
    fallback_damage: 30,
};

static DEFENSIVE: ResolutionTable = ResolutionTable {
    clash_damage: 12,
    player_wins: &[
        (Magic, Defend, 40),
        (Defend, Attack, 25),
        (Counter, Magic, 45),
        (Attack, Counter, 30),
    ],
    boss_wins: &[
        (Magic, Defend, 40),
        (Defend, Attack, 25),
        (Counter, Magic, 45),
        (Attack, Counter, 30),
    ],
    fallback_damage: 28,
};

static ENRAGED: ResolutionTable = ResolutionTable {
    clash_damage: 20,
    player_wins: &[
        (Defend, Attack, 35),
        (Attack, Magic, 45),
        (Magic, Counter, 40),
        (Counter, Defend, 60),
    ],
    boss_wins: &[
        (Defend, Attack, 35),
        (Attack, Magic, 45),
        (Magic, Counter, 40),
        (Counter, Defend, 60),
    ],
    fallback_damage: 38,
};

const fn table_for(phase: BossPhase) -> &'static ResolutionTable {
    match phase {
        BossPhase::Normal => &NORMAL,
        BossPhase::Angry => &ANGRY,
        BossPhase::Defensive => &DEFENSIVE,
        BossPhase::Enraged => &ENRAGED,
    }
}

/// Clash damage constant for a phase.
#[must_use]
pub const fn clash_damage(phase: BossPhase) -> i32 {
    table_for(phase).clash_damage
}

/// Resolve one round of simultaneous actions under the phase's table.
///
/// Precedence: clash, explicit player-wins pairs in listed order, explicit
/// boss-wins pairs, then the fallback hit on the player.
#[must_use]
pub fn resolve_round(phase: BossPhase, player_action: Action, boss_action: Action) -> Resolution {
    let table = table_for(phase);

    if player_action == boss_action {
        return Resolution {
            rule: ResolutionRule::Clash,
            damage_to_boss: table.clash_damage,
            damage_to_player: table.clash_damage,
        };
    }

    for (player, boss, damage) in table.player_wins {
        if *player == player_action && *boss == boss_action {
            return Resolution {
                rule: ResolutionRule::PlayerWins,
                damage_to_boss: *damage,
                damage_to_player: 0,
            };
        }
    }

    for (boss, player, damage) in table.boss_wins {
        if *boss == boss_action && *player == player_action {
            return Resolution {
                rule: ResolutionRule::BossWins,
                damage_to_boss: 0,
                damage_to_player: *damage,
            };
        }
    }

    Resolution {
        rule: ResolutionRule::Fallback,
        damage_to_boss: 0,
        damage_to_player: table.fallback_damage,
    }
}
