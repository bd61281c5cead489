//! Headless QA driver for Hollowdeep boss encounters.
//!
//! Plays seeded battles under scripted player strategies and reports
//! aggregate outcomes, either as a colored console table or as JSON for
//! downstream tooling.

mod policy;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use hollowdeep_game::{Battle, BattleOutcome, BattleView, EncounterConfig, Player};
use log::{debug, info};
use policy::{BattlePolicy, BattleStrategy};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "hollowdeep-tester", version)]
#[command(about = "Automated QA sweeps for Hollowdeep boss encounters")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Strategies to run (comma-separated)
    #[arg(long, default_value = "aggressive,adaptive")]
    strategies: String,

    /// Iterations per (strategy, seed) pair; the index perturbs the seed
    #[arg(long, default_value_t = 10)]
    iterations: u64,

    /// Player HP at the start of every encounter
    #[arg(long, default_value_t = 100)]
    player_hp: i32,

    /// Force the boss into the demo/tutorial policy
    #[arg(long)]
    demo: bool,

    /// List available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,
}

/// Minimal player entity for headless runs.
#[derive(Debug, Clone)]
struct SimPlayer {
    hp: i32,
}

impl Player for SimPlayer {
    fn hp(&self) -> i32 {
        self.hp
    }

    fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone, Serialize)]
struct RunRecord {
    strategy: &'static str,
    seed: u64,
    outcome: BattleOutcome,
    rounds: u32,
    boss_hp_remaining: i32,
    damage_to_player: i32,
}

#[derive(Debug, Clone, Serialize)]
struct StrategyAggregate {
    strategy: &'static str,
    battles: u32,
    won: u32,
    lost: u32,
    fled: u32,
    avg_rounds: f64,
    avg_damage_taken: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_strategies {
        for strategy in BattleStrategy::ALL {
            println!("{:<12} {}", strategy.label(), strategy.describe());
        }
        return Ok(());
    }

    let seeds = parse_seeds(&args.seeds)?;
    let strategies = parse_strategies(&args.strategies)?;
    if args.player_hp < 1 {
        bail!("player HP must be at least 1");
    }

    let cfg = EncounterConfig::load_from_static();
    cfg.validate().context("encounter config invalid")?;

    let records = run_sweep(&args, &cfg, &seeds, &strategies);
    let aggregates = aggregate(&strategies, &records);

    match args.report.as_str() {
        "json" => print_json(&aggregates, &records)?,
        _ => print_console(&args, &aggregates),
    }
    Ok(())
}

fn run_sweep(
    args: &Args,
    cfg: &EncounterConfig,
    seeds: &[u64],
    strategies: &[BattleStrategy],
) -> Vec<RunRecord> {
    let mut records = Vec::new();
    for strategy in strategies {
        info!(
            "running {} battles for strategy {}",
            seeds.len() as u64 * args.iterations,
            strategy
        );
        for seed in seeds {
            for iteration in 0..args.iterations {
                let battle_seed = mix_seed(*seed, iteration);
                let mut policy = strategy.create_policy(battle_seed);
                let mut player = SimPlayer { hp: args.player_hp };
                let mut battle =
                    Battle::from_seed(&mut player, cfg.clone(), battle_seed, args.demo);
                let mut source = |view: &BattleView| policy.pick_command(view);
                let outcome = battle.run(&mut source);
                let summary = battle.summary().expect("finished battle has a summary");
                debug!(
                    "{} seed {battle_seed}: {outcome} in {} rounds",
                    strategy, summary.rounds
                );
                records.push(RunRecord {
                    strategy: strategy.label(),
                    seed: battle_seed,
                    outcome,
                    rounds: summary.rounds,
                    boss_hp_remaining: summary.boss_hp_remaining,
                    damage_to_player: summary.damage_to_player,
                });
            }
        }
    }
    records
}

fn aggregate(strategies: &[BattleStrategy], records: &[RunRecord]) -> Vec<StrategyAggregate> {
    strategies
        .iter()
        .map(|strategy| {
            let mut agg = StrategyAggregate {
                strategy: strategy.label(),
                battles: 0,
                won: 0,
                lost: 0,
                fled: 0,
                avg_rounds: 0.0,
                avg_damage_taken: 0.0,
            };
            let mut total_rounds = 0u64;
            let mut total_damage = 0i64;
            for record in records.iter().filter(|r| r.strategy == strategy.label()) {
                agg.battles += 1;
                match record.outcome {
                    BattleOutcome::Won => agg.won += 1,
                    BattleOutcome::Lost => agg.lost += 1,
                    BattleOutcome::Fled => agg.fled += 1,
                }
                total_rounds += u64::from(record.rounds);
                total_damage += i64::from(record.damage_to_player);
            }
            if agg.battles > 0 {
                agg.avg_rounds = total_rounds as f64 / f64::from(agg.battles);
                agg.avg_damage_taken = total_damage as f64 / f64::from(agg.battles);
            }
            agg
        })
        .collect()
}

fn print_console(args: &Args, aggregates: &[StrategyAggregate]) {
    println!("{}", "Hollowdeep encounter sweep".bold());
    if args.demo {
        println!("{}", "(demo mode: the boss only guards)".dimmed());
    }
    println!(
        "{:<12} {:>8} {:>6} {:>6} {:>6} {:>10} {:>10}",
        "strategy", "battles", "won", "lost", "fled", "avg rnds", "avg dmg"
    );
    for agg in aggregates {
        println!(
            "{:<12} {:>8} {:>6} {:>6} {:>6} {:>10.1} {:>10.1}",
            agg.strategy,
            agg.battles,
            agg.won.to_string().green(),
            agg.lost.to_string().red(),
            agg.fled.to_string().yellow(),
            agg.avg_rounds,
            agg.avg_damage_taken
        );
    }
}

fn print_json(aggregates: &[StrategyAggregate], records: &[RunRecord]) -> Result<()> {
    let report = serde_json::json!({
        "aggregates": aggregates,
        "battles": records,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(raw)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

fn parse_strategies(raw: &str) -> Result<Vec<BattleStrategy>> {
    let strategies = split_csv(raw)
        .iter()
        .map(|token| {
            BattleStrategy::parse(token).with_context(|| {
                let known = BattleStrategy::ALL.map(BattleStrategy::label).join(", ");
                format!("unknown strategy '{token}' (available: {known})")
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if strategies.is_empty() {
        bail!("no strategies given");
    }
    Ok(strategies)
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Deterministic per-iteration seed derivation.
const fn mix_seed(seed: u64, iteration: u64) -> u64 {
    seed.wrapping_add(iteration.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
