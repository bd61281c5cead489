use hollowdeep_game::{
    Action, Battle, BattleEventKind, BattleOutcome, BattleView, BossPhase, EncounterConfig,
    Player, PlayerCommand, run_battle,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 5000;
const TOLERANCE: f64 = 0.025;

struct SimPlayer {
    hp: i32,
}

impl Player for SimPlayer {
    fn hp(&self) -> i32 {
        self.hp
    }

    fn take_damage(&mut self, amount: i32) {
        assert!(amount >= 0, "core must never forward negative damage");
        self.hp = (self.hp - amount).max(0);
    }

    fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[test]
fn action_distributions_track_the_weight_tables() {
    let mut rng = SmallRng::seed_from_u64(0xACED);
    for phase in BossPhase::ALL {
        let mut counts = [0usize; 4];
        for _ in 0..SAMPLE_SIZE {
            let action = phase.choose_action(&mut rng);
            let slot = Action::ALL
                .iter()
                .position(|candidate| *candidate == action)
                .expect("drawn action is a known variant");
            counts[slot] += 1;
        }

        for (slot, (action, weight)) in phase.action_weights().iter().enumerate() {
            let expected = f64::from(*weight) / 100.0;
            let observed = counts[slot] as f64 / SAMPLE_SIZE as f64;
            if *weight == 0 {
                assert_eq!(counts[slot], 0, "{phase}/{action} has zero weight");
            } else {
                assert!(
                    (observed - expected).abs() <= TOLERANCE,
                    "{phase}/{action} rate drifted: observed {observed:.4}, expected {expected:.2}"
                );
            }
        }
    }
}

#[test]
fn demo_battles_always_fall_to_a_persistent_attacker() {
    for seed in [1, 42, 1337, 0xDEAD_BEEF] {
        let mut player = SimPlayer { hp: 100 };
        let cfg = EncounterConfig::load_from_static();
        let mut battle = Battle::from_seed(&mut player, cfg, seed, true);
        let mut source = |_view: &BattleView| PlayerCommand::Act(Action::Attack);
        let outcome = battle.run(&mut source);

        assert_eq!(outcome, BattleOutcome::Won, "seed {seed}");
        let summary = battle.summary().expect("battle ended");
        // 200 HP at 20..=30 per hit lands between 7 and 10 rounds.
        assert!(
            (7..=10).contains(&summary.rounds),
            "seed {seed} took {} rounds",
            summary.rounds
        );
        assert_eq!(summary.damage_to_player, 0);
        drop(battle);
        assert_eq!(player.hp, 100, "the guarding boss never strikes back");
    }
}

#[test]
fn seeded_battles_replay_identically() {
    let transcript = |seed: u64| {
        let mut player = SimPlayer { hp: 500 };
        let cfg = EncounterConfig::load_from_static();
        let mut battle = Battle::from_seed(&mut player, cfg, seed, false);
        let mut turn = 0u32;
        let mut source = move |_view: &BattleView| {
            turn += 1;
            PlayerCommand::Act(Action::ALL[(turn as usize) % Action::ALL.len()])
        };
        let outcome = battle.run(&mut source);
        let summary = battle.summary().expect("battle ended");
        (outcome, summary.rounds, summary.boss_hp_remaining)
    };

    assert_eq!(transcript(0xC0FFEE), transcript(0xC0FFEE));
}

#[test]
fn phases_only_ever_escalate() {
    for seed in [7, 99, 4096] {
        let mut player = SimPlayer { hp: 10_000 };
        let cfg = EncounterConfig::load_from_static();
        let mut battle = Battle::from_seed(&mut player, cfg, seed, false);

        let mut previous = battle.phase();
        let mut rounds = 0u32;
        loop {
            let view = battle.view();
            assert!(view.boss_hp >= 0 && view.boss_hp <= view.boss_max_hp);
            let finished = battle
                .play_round(PlayerCommand::Act(Action::ALL[(rounds as usize) % 4]))
                .is_some();
            assert!(battle.phase() >= previous, "seed {seed} walked a phase back");
            previous = battle.phase();
            rounds += 1;
            if finished {
                break;
            }
            assert!(rounds < 10_000, "battle failed to terminate");
        }

        let shifts = battle
            .events()
            .iter()
            .filter(|event| event.kind == BattleEventKind::PhaseShifted)
            .count();
        assert!(shifts <= 3, "only three escalations exist");
    }
}

#[test]
fn run_battle_smoke() {
    let mut player = SimPlayer { hp: 100 };
    let mut source = |_view: &BattleView| PlayerCommand::Act(Action::Attack);
    let outcome = run_battle(&mut player, &mut source, 1337, true);
    assert_eq!(outcome, BattleOutcome::Won);

    let mut player = SimPlayer { hp: 100 };
    let mut source = |_view: &BattleView| PlayerCommand::Flee;
    let outcome = run_battle(&mut player, &mut source, 1337, false);
    assert_eq!(outcome, BattleOutcome::Fled);
    assert_eq!(player.hp, 100);
}
