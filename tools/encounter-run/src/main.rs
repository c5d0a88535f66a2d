//! encounter-run: headless driver for BREACH encounters.
//!
//! Usage:
//!   encounter-run --scenario two-wave
//!   encounter-run --config encounter.json --seed 7 --max-ticks 20000 --json

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use breach_core::commands::SimCommand;
use breach_core::config::EncounterConfig;
use breach_core::enums::ScenarioId;
use breach_core::events::SimEvent;
use breach_sim::ground::FlatGround;
use breach_sim::scenario::build_config;
use breach_sim::SimulationEngine;

#[derive(Parser)]
#[clap(name = "encounter-run", about = "Run a BREACH encounter headless and report what happened")]
struct Opt {
    /// JSON encounter config. Overrides --scenario.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Built-in scenario to run when no config file is given.
    #[clap(short, long, value_enum, default_value = "default")]
    scenario: ScenarioArg,
    /// Override the config's RNG seed.
    #[clap(long)]
    seed: Option<u64>,
    /// Stop after this many ticks even if agents are still walking.
    #[clap(long, default_value_t = 50_000)]
    max_ticks: u64,
    /// Height of the flat ground plane.
    #[clap(long, default_value_t = 0.0)]
    ground: f32,
    /// Print every event as a JSON line instead of a summary.
    #[clap(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Default,
    Walkthrough,
    TwoWave,
    Burst,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Default => ScenarioId::Default,
            ScenarioArg::Walkthrough => ScenarioId::Walkthrough,
            ScenarioArg::TwoWave => ScenarioId::TwoWave,
            ScenarioArg::Burst => ScenarioId::Burst,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::parse();

    let mut config = match &opt.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("loading encounter config {}", path.display()))?,
        None => build_config(opt.scenario.into()),
    };
    if let Some(seed) = opt.seed {
        config.seed = seed;
    }
    config.validate().context("invalid encounter config")?;

    log::info!(
        "Running {} wave(s) at {} Hz, seed {}",
        config.waves.wave_count(),
        config.tick_rate,
        config.seed
    );

    let mut engine = SimulationEngine::new(config, Box::new(FlatGround { height: opt.ground }));
    engine.queue_command(SimCommand::StartEncounter);
    let events = engine.run_to_completion(opt.max_ticks);

    if opt.json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        print_summary(&engine, &events);
    }

    if !engine.is_finished() {
        bail!(
            "encounter still running after {} ticks ({} agents alive)",
            opt.max_ticks,
            engine.agent_count()
        );
    }
    Ok(())
}

fn print_summary(engine: &SimulationEngine, events: &[SimEvent]) {
    let count = |pred: fn(&SimEvent) -> bool| events.iter().filter(|e| pred(e)).count();

    let waves = count(|e| matches!(e, SimEvent::WaveStarted { .. }));
    let spawned = count(|e| matches!(e, SimEvent::EnemySpawned { .. }));
    let skipped = count(|e| matches!(e, SimEvent::SpawnSkipped { .. }));
    let settled = count(|e| matches!(e, SimEvent::AgentSettled { .. }));
    let obstacles: usize = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::ObstaclesSpawned { total, .. } => Some(*total),
            _ => None,
        })
        .sum();

    let time = engine.time();
    println!("ticks:      {} ({:.1}s)", time.tick, time.elapsed_secs);
    println!("phase:      {:?}", engine.phase());
    println!("waves:      {waves}");
    println!("spawned:    {spawned} ({skipped} skipped)");
    println!("obstacles:  {obstacles} placed over the encounter");
    println!("settled:    {settled} of {} alive", engine.agent_count());
}
