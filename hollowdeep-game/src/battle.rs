//! The boss-encounter round loop.
//!
//! The loop owns the context and the current phase tag; phase and resolution
//! logic never call back into it. Each round has exactly one suspension
//! point: obtaining the player's command from the input collaborator. Once
//! the command is known the round runs to completion atomically.

use crate::action::{Action, PlayerCommand};
use crate::config::EncounterConfig;
#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;
use crate::constants::{
    LOG_BOSS_ACTION, LOG_BOSS_HIT, LOG_CLASH, LOG_PHASE_ANGRY, LOG_PHASE_DEFENSIVE,
    LOG_PHASE_ENRAGED, LOG_PHASE_NORMAL, LOG_PHASE_SHIFT, LOG_PLAYER_HIT, LOG_TUTORIAL_HIT,
};
use crate::context::{BattleContext, Player};
use crate::event::{
    BattleEvent, BattleEventKind, EventId, EventSeverity, EventTag, EventTagSet,
};
use crate::phase::BossPhase;
use crate::resolve::{Resolution, ResolutionRule, resolve_round};
use crate::rng::{BattleRng, roll_between};
use crate::summary::{BattleSummary, outcome_ui_key};
use rand::RngCore;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Terminal result of one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Won,
    Lost,
    Fled,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => f.write_str("won"),
            Self::Lost => f.write_str("lost"),
            Self::Fled => f.write_str("fled"),
        }
    }
}

/// Read-only status snapshot handed to the input collaborator each round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattleView {
    pub round: u32,
    pub phase: BossPhase,
    pub boss_hp: i32,
    pub boss_max_hp: i32,
    pub player_hp: i32,
    pub demo_mode: bool,
}

/// Input collaborator: yields the player's command for each round.
///
/// Implementations own the raw-input mapping; `parse_player_command` with
/// the configured fallback action covers the text case.
pub trait ActionSource {
    fn next_command(&mut self, view: &BattleView) -> PlayerCommand;
}

impl<F> ActionSource for F
where
    F: FnMut(&BattleView) -> PlayerCommand,
{
    fn next_command(&mut self, view: &BattleView) -> PlayerCommand {
        self(view)
    }
}

/// One boss encounter: context, current phase tag, and the event stream.
#[derive(Debug)]
pub struct Battle<'a, P: Player, R: RngCore = SmallRng> {
    ctx: BattleContext<'a, P>,
    phase: BossPhase,
    round: u32,
    event_seq: u16,
    demo_mode: bool,
    cfg: EncounterConfig,
    rng: BattleRng<R>,
    events: Vec<BattleEvent>,
    damage_to_boss_total: i32,
    damage_to_player_total: i32,
    outcome: Option<BattleOutcome>,
}

impl<'a, P: Player> Battle<'a, P, SmallRng> {
    /// Create an encounter with RNG streams derived from a user seed.
    #[must_use]
    pub fn from_seed(player: &'a mut P, cfg: EncounterConfig, seed: u64, demo_mode: bool) -> Self {
        Self::new(player, cfg, BattleRng::from_user_seed(seed), demo_mode)
    }
}

impl<'a, P: Player, R: RngCore> Battle<'a, P, R> {
    #[must_use]
    pub fn new(player: &'a mut P, cfg: EncounterConfig, rng: BattleRng<R>, demo_mode: bool) -> Self {
        let ctx = BattleContext::new(player, cfg.boss_max_hp);
        let mut battle = Self {
            ctx,
            phase: BossPhase::Normal,
            round: 1,
            event_seq: 0,
            demo_mode,
            cfg,
            rng,
            events: Vec::new(),
            damage_to_boss_total: 0,
            damage_to_player_total: 0,
            outcome: None,
        };
        battle.push_phase_entered(None);
        battle
    }

    #[must_use]
    pub const fn phase(&self) -> BossPhase {
        self.phase
    }

    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    #[must_use]
    pub fn view(&self) -> BattleView {
        BattleView {
            round: self.round,
            phase: self.phase,
            boss_hp: self.ctx.boss_hp(),
            boss_max_hp: self.ctx.boss_max_hp(),
            player_hp: self.ctx.player_hp(),
            demo_mode: self.demo_mode,
        }
    }

    /// Result-surface summary, available once the battle has ended.
    #[must_use]
    pub fn summary(&self) -> Option<BattleSummary> {
        let outcome = self.outcome?;
        Some(BattleSummary {
            outcome,
            rounds: self.round,
            final_phase: self.phase,
            boss_hp_remaining: self.ctx.boss_hp(),
            damage_to_boss: self.damage_to_boss_total,
            damage_to_player: self.damage_to_player_total,
            ui_key: outcome_ui_key(outcome).to_string(),
        })
    }

    /// Run rounds until a terminal outcome.
    pub fn run<S: ActionSource>(&mut self, source: &mut S) -> BattleOutcome {
        loop {
            let view = self.view();
            let command = source.next_command(&view);
            if let Some(outcome) = self.play_round(command) {
                return outcome;
            }
        }
    }

    /// Advance one round with the given player command. Returns the outcome
    /// once the battle is over; later calls keep returning it.
    pub fn play_round(&mut self, command: PlayerCommand) -> Option<BattleOutcome> {
        if let Some(outcome) = self.outcome {
            return Some(outcome);
        }

        let player_action = match command {
            PlayerCommand::Flee => return Some(self.finish(BattleOutcome::Fled)),
            PlayerCommand::Act(action) => action,
        };

        // A previous round may already have dropped the boss.
        if self.ctx.boss_hp() <= 0 {
            return Some(self.finish(BattleOutcome::Won));
        }

        let boss_action = self.boss_action();
        if player_action == Action::Defend {
            self.ctx.set_player_defending(true);
        }

        let resolution = if self.demo_mode {
            self.resolve_demo(player_action)
        } else {
            resolve_round(self.phase, player_action, boss_action)
        };
        self.apply_resolution(player_action, boss_action, resolution);

        if let Some(outcome) = self.round_outcome() {
            return Some(self.finish(outcome));
        }

        self.check_phase_shift();
        self.ctx.set_player_defending(false);
        self.round += 1;
        self.event_seq = 0;
        None
    }

    fn boss_action(&mut self) -> Action {
        if self.demo_mode {
            // Override policy: the boss holds its guard in every phase.
            self.push_event(
                BattleEventKind::BossActionChosen,
                EventSeverity::Info,
                tag_set(&["demo"]),
                Some(LOG_BOSS_ACTION),
                serde_json::json!({
                    "phase": self.phase,
                    "action": Action::Defend,
                    "forced": true
                }),
            );
            return Action::Defend;
        }

        let (action, trace) = self.phase.choose_action_traced(self.rng.boss_action());
        self.push_event(
            BattleEventKind::BossActionChosen,
            EventSeverity::Info,
            EventTagSet::new(),
            Some(LOG_BOSS_ACTION),
            serde_json::json!({
                "phase": self.phase,
                "action": action,
                "trace": trace
            }),
        );
        action
    }

    /// Tutorial resolution: offensive player actions always land, the boss
    /// only guards.
    fn resolve_demo(&mut self, player_action: Action) -> Resolution {
        let damage_to_boss = if player_action.is_offensive() {
            roll_between(
                self.rng.demo_damage(),
                self.cfg.demo_hit_min,
                self.cfg.demo_hit_max,
            )
        } else {
            0
        };
        Resolution {
            rule: ResolutionRule::PlayerWins,
            damage_to_boss,
            damage_to_player: 0,
        }
    }

    fn apply_resolution(&mut self, player_action: Action, boss_action: Action, res: Resolution) {
        // Clash recoil is mutual and ignores the defend mitigation.
        let player_damage = match res.rule {
            ResolutionRule::Clash => res.damage_to_player,
            _ => self.ctx.mitigated_player_damage(res.damage_to_player),
        };
        self.ctx.deal_damage_to_boss(res.damage_to_boss);
        self.ctx.deal_damage_to_player(player_damage);
        self.damage_to_boss_total = self.damage_to_boss_total.saturating_add(res.damage_to_boss);
        self.damage_to_player_total = self.damage_to_player_total.saturating_add(player_damage);

        let ui_key = match res.rule {
            ResolutionRule::Clash => LOG_CLASH,
            ResolutionRule::PlayerWins if self.demo_mode => LOG_TUTORIAL_HIT,
            ResolutionRule::PlayerWins => LOG_PLAYER_HIT,
            ResolutionRule::BossWins | ResolutionRule::Fallback => LOG_BOSS_HIT,
        };
        let mut tags = tag_set(&[rule_tag(res.rule)]);
        if self.demo_mode {
            tags.push(EventTag::new("demo"));
        }
        if self.ctx.is_player_defending() {
            tags.push(EventTag::new("defended"));
        }
        self.push_event(
            BattleEventKind::RoundResolved,
            EventSeverity::Info,
            tags,
            Some(ui_key),
            serde_json::json!({
                "player_action": player_action,
                "boss_action": boss_action,
                "rule": res.rule,
                "damage_to_boss": res.damage_to_boss,
                "damage_to_player": player_damage,
                "boss_hp": self.ctx.boss_hp(),
                "player_hp": self.ctx.player_hp()
            }),
        );

        if debug_log_enabled() {
            println!(
                "Battle round {} | {} vs {} -> boss -{} player -{}",
                self.round, player_action, boss_action, res.damage_to_boss, player_damage
            );
        }
    }

    fn round_outcome(&self) -> Option<BattleOutcome> {
        if self.ctx.boss_hp() <= 0 {
            return Some(BattleOutcome::Won);
        }
        if self.ctx.player_hp() <= 0 || !self.ctx.player_alive() {
            return Some(BattleOutcome::Lost);
        }
        None
    }

    fn check_phase_shift(&mut self) {
        let Some(next) = self.phase.check_transition(self.ctx.boss_hp_percent()) else {
            return;
        };
        let previous = self.phase;
        self.phase = next;
        self.push_event(
            BattleEventKind::PhaseShifted,
            EventSeverity::Warning,
            EventTagSet::new(),
            Some(LOG_PHASE_SHIFT),
            serde_json::json!({
                "from": previous,
                "to": next,
                "boss_hp": self.ctx.boss_hp(),
                "hp_percent": self.ctx.boss_hp_percent()
            }),
        );
        self.push_phase_entered(Some(previous));
    }

    fn push_phase_entered(&mut self, from: Option<BossPhase>) {
        let ui_key = match self.phase {
            BossPhase::Normal => LOG_PHASE_NORMAL,
            BossPhase::Angry => LOG_PHASE_ANGRY,
            BossPhase::Defensive => LOG_PHASE_DEFENSIVE,
            BossPhase::Enraged => LOG_PHASE_ENRAGED,
        };
        self.push_event(
            BattleEventKind::PhaseEntered,
            EventSeverity::Info,
            EventTagSet::new(),
            Some(ui_key),
            serde_json::json!({ "phase": self.phase, "from": from }),
        );
    }

    fn finish(&mut self, outcome: BattleOutcome) -> BattleOutcome {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
            let severity = match outcome {
                BattleOutcome::Won => EventSeverity::Info,
                BattleOutcome::Fled => EventSeverity::Warning,
                BattleOutcome::Lost => EventSeverity::Critical,
            };
            self.push_event(
                BattleEventKind::BattleEnded,
                severity,
                EventTagSet::new(),
                Some(outcome_ui_key(outcome)),
                serde_json::json!({
                    "outcome": outcome,
                    "rounds": self.round,
                    "boss_hp": self.ctx.boss_hp()
                }),
            );
        }
        outcome
    }

    fn push_event(
        &mut self,
        kind: BattleEventKind,
        severity: EventSeverity,
        tags: EventTagSet,
        ui_key: Option<&str>,
        payload: serde_json::Value,
    ) {
        self.events.push(BattleEvent {
            id: EventId::new(self.round, self.event_seq),
            round: self.round,
            kind,
            severity,
            tags,
            ui_key: ui_key.map(String::from),
            payload,
        });
        self.event_seq = self.event_seq.saturating_add(1);
    }
}

const fn rule_tag(rule: ResolutionRule) -> &'static str {
    match rule {
        ResolutionRule::Clash => "clash",
        ResolutionRule::PlayerWins => "player_wins",
        ResolutionRule::BossWins => "boss_wins",
        ResolutionRule::Fallback => "fallback",
    }
}

fn tag_set(tags: &[&str]) -> EventTagSet {
    tags.iter().map(|tag| EventTag::new(tag)).collect()
}

/// Run a complete encounter against the default configuration.
pub fn run_battle<P: Player, S: ActionSource>(
    player: &mut P,
    source: &mut S,
    seed: u64,
    demo_mode: bool,
) -> BattleOutcome {
    let cfg = EncounterConfig::load_from_static();
    Battle::from_seed(player, cfg, seed, demo_mode).run(source)
}
