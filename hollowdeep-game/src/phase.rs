//! Boss phase state machine.
//!
//! Phases carry no instance data: the tag alone selects the action odds,
//! the resolution table, and the escalation threshold. Transitions only
//! ever move forward along Normal -> Angry -> Defensive -> Enraged.

use crate::action::Action;
use crate::constants::{ANGRY_THRESHOLD, DEFENSIVE_THRESHOLD, ENRAGED_THRESHOLD};
use crate::event::{ActionDecisionTrace, WeightedAction};
use crate::rng::roll_pct;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boss behavior mode. Tags are ordered by escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossPhase {
    Normal,
    Angry,
    Defensive,
    Enraged,
}

/// Action-selection weights per phase, cumulative roll out of 100, in the
/// order the cumulative walk checks them.
const NORMAL_WEIGHTS: [(Action, u32); 4] = [
    (Action::Attack, 25),
    (Action::Defend, 25),
    (Action::Magic, 25),
    (Action::Counter, 25),
];
const ANGRY_WEIGHTS: [(Action, u32); 4] = [
    (Action::Attack, 50),
    (Action::Defend, 0),
    (Action::Magic, 20),
    (Action::Counter, 30),
];
const DEFENSIVE_WEIGHTS: [(Action, u32); 4] = [
    (Action::Attack, 0),
    (Action::Defend, 60),
    (Action::Magic, 10),
    (Action::Counter, 30),
];
const ENRAGED_WEIGHTS: [(Action, u32); 4] = [
    (Action::Attack, 70),
    (Action::Defend, 0),
    (Action::Magic, 20),
    (Action::Counter, 10),
];

impl BossPhase {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Angry, Self::Defensive, Self::Enraged];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Angry => "angry",
            Self::Defensive => "defensive",
            Self::Enraged => "enraged",
        }
    }

    /// The phase's fixed action distribution.
    #[must_use]
    pub const fn action_weights(self) -> &'static [(Action, u32); 4] {
        match self {
            Self::Normal => &NORMAL_WEIGHTS,
            Self::Angry => &ANGRY_WEIGHTS,
            Self::Defensive => &DEFENSIVE_WEIGHTS,
            Self::Enraged => &ENRAGED_WEIGHTS,
        }
    }

    /// Draw the boss action for this phase from its fixed distribution.
    pub fn choose_action<R: RngCore>(self, rng: &mut R) -> Action {
        self.action_for_roll(roll_pct(rng))
    }

    /// Draw the boss action and capture the selection telemetry.
    pub fn choose_action_traced<R: RngCore>(self, rng: &mut R) -> (Action, ActionDecisionTrace) {
        let roll = roll_pct(rng);
        let action = self.action_for_roll(roll);
        let candidates = self
            .action_weights()
            .iter()
            .map(|(action, weight)| WeightedAction {
                action: *action,
                weight: *weight,
            })
            .collect();
        let trace = ActionDecisionTrace {
            pool_id: format!("hollowdeep.boss.{self}"),
            roll,
            candidates,
            chosen: action,
        };
        (action, trace)
    }

    fn action_for_roll(self, roll: u32) -> Action {
        let weights = self.action_weights();
        let mut cumulative = 0;
        for (action, weight) in weights {
            cumulative += weight;
            if roll < cumulative {
                return *action;
            }
        }
        // Weights sum to the full roll span; a clamped roll lands on the
        // last entry.
        weights[weights.len() - 1].0
    }

    /// The phase that follows this one, if any. Enraged is terminal.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Normal => Some(Self::Angry),
            Self::Angry => Some(Self::Defensive),
            Self::Defensive => Some(Self::Enraged),
            Self::Enraged => None,
        }
    }

    /// Boss HP fraction at or below which this phase gives way.
    #[must_use]
    pub const fn transition_threshold(self) -> Option<f32> {
        match self {
            Self::Normal => Some(ANGRY_THRESHOLD),
            Self::Angry => Some(DEFENSIVE_THRESHOLD),
            Self::Defensive => Some(ENRAGED_THRESHOLD),
            Self::Enraged => None,
        }
    }

    /// The next phase when `hp_percent` has crossed this phase's threshold.
    #[must_use]
    pub fn check_transition(self, hp_percent: f32) -> Option<Self> {
        match (self.next(), self.transition_threshold()) {
            (Some(next), Some(threshold)) if hp_percent <= threshold => Some(next),
            _ => None,
        }
    }
}

impl fmt::Display for BossPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct FixedRng(u32);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn weights_sum_to_roll_span() {
        for phase in BossPhase::ALL {
            let total: u32 = phase.action_weights().iter().map(|(_, w)| *w).sum();
            assert_eq!(total, 100, "{phase} weights must cover the roll span");
        }
    }

    #[test]
    fn cumulative_walk_respects_listed_order() {
        assert_eq!(BossPhase::Normal.action_for_roll(0), Action::Attack);
        assert_eq!(BossPhase::Normal.action_for_roll(24), Action::Attack);
        assert_eq!(BossPhase::Normal.action_for_roll(25), Action::Defend);
        assert_eq!(BossPhase::Normal.action_for_roll(74), Action::Magic);
        assert_eq!(BossPhase::Normal.action_for_roll(99), Action::Counter);

        // Zero-weight entries are skipped by the walk.
        assert_eq!(BossPhase::Angry.action_for_roll(49), Action::Attack);
        assert_eq!(BossPhase::Angry.action_for_roll(50), Action::Magic);
        assert_eq!(BossPhase::Defensive.action_for_roll(0), Action::Defend);
        assert_eq!(BossPhase::Defensive.action_for_roll(69), Action::Magic);
        assert_eq!(BossPhase::Enraged.action_for_roll(70), Action::Magic);
        assert_eq!(BossPhase::Enraged.action_for_roll(90), Action::Counter);
    }

    #[test]
    fn choose_action_uses_injected_stream() {
        let mut rng = FixedRng(5);
        assert_eq!(BossPhase::Angry.choose_action(&mut rng), Action::Attack);
        let mut rng = FixedRng(95);
        assert_eq!(BossPhase::Defensive.choose_action(&mut rng), Action::Counter);
    }

    #[test]
    fn traced_draw_reports_candidates_and_roll() {
        let mut rng = FixedRng(72);
        let (action, trace) = BossPhase::Normal.choose_action_traced(&mut rng);
        assert_eq!(action, Action::Magic);
        assert_eq!(trace.chosen, Action::Magic);
        assert_eq!(trace.roll, 72);
        assert_eq!(trace.pool_id, "hollowdeep.boss.normal");
        assert_eq!(trace.candidates.len(), 4);
        assert_eq!(trace.candidates[0].action, Action::Attack);
    }

    #[test]
    fn transitions_are_strictly_monotonic() {
        for phase in BossPhase::ALL {
            if let Some(next) = phase.next() {
                assert!(next > phase, "{phase} must escalate forward");
            }
        }
        assert_eq!(BossPhase::Enraged.next(), None);
        // Even a full heal never walks a later phase back.
        assert_eq!(BossPhase::Angry.check_transition(1.0), None);
        assert_eq!(BossPhase::Enraged.check_transition(0.0), None);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert_eq!(
            BossPhase::Normal.check_transition(150.0 / 200.0),
            Some(BossPhase::Angry)
        );
        assert_eq!(
            BossPhase::Normal.check_transition(149.0 / 200.0),
            Some(BossPhase::Angry)
        );
        assert_eq!(BossPhase::Normal.check_transition(151.0 / 200.0), None);
        assert_eq!(
            BossPhase::Angry.check_transition(0.50),
            Some(BossPhase::Defensive)
        );
        assert_eq!(
            BossPhase::Defensive.check_transition(0.25),
            Some(BossPhase::Enraged)
        );
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = ChaCha20Rng::seed_from_u64(1234);
        let mut b = ChaCha20Rng::seed_from_u64(1234);
        for phase in BossPhase::ALL {
            assert_eq!(phase.choose_action(&mut a), phase.choose_action(&mut b));
        }
    }
}
