//! Scripted player strategies for automated encounter sweeps.

use hollowdeep_game::{Action, BattleView, BossPhase, PlayerCommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fmt;

/// HP under which the skittish strategy gives up and runs.
const SKITTISH_HP_FLOOR: i32 = 35;

/// Policy interface for automated play strategies.
pub trait BattlePolicy {
    /// Name used for logging/report output.
    fn name(&self) -> &'static str;

    /// Select the player's command for the coming round.
    fn pick_command(&mut self, view: &BattleView) -> PlayerCommand;
}

/// Built-in strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleStrategy {
    Aggressive,
    Turtle,
    CounterSpam,
    Adaptive,
    Random,
    Skittish,
}

impl BattleStrategy {
    pub const ALL: [Self; 6] = [
        Self::Aggressive,
        Self::Turtle,
        Self::CounterSpam,
        Self::Adaptive,
        Self::Random,
        Self::Skittish,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Turtle => "turtle",
            Self::CounterSpam => "counter",
            Self::Adaptive => "adaptive",
            Self::Random => "random",
            Self::Skittish => "skittish",
        }
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Aggressive => "attacks every round",
            Self::Turtle => "defends every round",
            Self::CounterSpam => "counters every round",
            Self::Adaptive => "answers each phase's most likely boss action",
            Self::Random => "uniform random action each round",
            Self::Skittish => "attacks until low HP, then flees",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label() == token)
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn BattlePolicy + Send> {
        match self {
            Self::Aggressive => Box::new(FixedPolicy {
                name: "aggressive",
                action: Action::Attack,
            }),
            Self::Turtle => Box::new(FixedPolicy {
                name: "turtle",
                action: Action::Defend,
            }),
            Self::CounterSpam => Box::new(FixedPolicy {
                name: "counter",
                action: Action::Counter,
            }),
            Self::Adaptive => Box::new(AdaptivePolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Skittish => Box::new(SkittishPolicy),
        }
    }
}

impl fmt::Display for BattleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct FixedPolicy {
    name: &'static str,
    action: Action,
}

struct AdaptivePolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

struct SkittishPolicy;

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl BattlePolicy for FixedPolicy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn pick_command(&mut self, _view: &BattleView) -> PlayerCommand {
        PlayerCommand::Act(self.action)
    }
}

impl BattlePolicy for AdaptivePolicy {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn pick_command(&mut self, view: &BattleView) -> PlayerCommand {
        PlayerCommand::Act(adaptive_answer(view.phase))
    }
}

impl BattlePolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick_command(&mut self, _view: &BattleView) -> PlayerCommand {
        let idx = self.rng.gen_range(0..Action::ALL.len());
        PlayerCommand::Act(Action::ALL[idx])
    }
}

impl BattlePolicy for SkittishPolicy {
    fn name(&self) -> &'static str {
        "skittish"
    }

    fn pick_command(&mut self, view: &BattleView) -> PlayerCommand {
        if view.player_hp < SKITTISH_HP_FLOOR {
            PlayerCommand::Flee
        } else {
            PlayerCommand::Act(Action::Attack)
        }
    }
}

/// The action that punishes the phase's modal boss action.
const fn adaptive_answer(phase: BossPhase) -> Action {
    match phase {
        // Uniform odds: Counter beats every distinct boss action here.
        BossPhase::Normal => Action::Counter,
        // Attack-heavy: Counter vs Attack is the 50-damage cell.
        BossPhase::Angry => Action::Counter,
        // Defend-heavy: Magic vs Defend breaks the guard.
        BossPhase::Defensive => Action::Magic,
        // Attack-heavy again, but its Counter answer got nerfed; Defend
        // still wins the common matchup.
        BossPhase::Enraged => Action::Defend,
    }
}
