#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the ant colony headlessly.

mod run_config;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colony_core::{config, Caste, ColonySnapshot, StatsReport};
use colony_host::{Settings, Simulation};
use colony_system_analytics as analytics;

use crate::run_config::{CasteChoice, GrowthChoice, LeverChoice, RunConfig, RunPlan};

/// Headless ant colony simulation.
#[derive(Debug, Parser)]
#[command(name = "colony", version, about)]
struct Cli {
    /// TOML run file; flags given on the command line override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run; omitted seeds are drawn from entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate.
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Ticks executed per timer firing.
    #[arg(short, long)]
    speed: Option<u32>,

    /// Caste the queen produces.
    #[arg(long, value_enum)]
    caste: Option<CasteChoice>,

    /// How surplus food becomes new ants.
    #[arg(long, value_enum)]
    growth: Option<GrowthChoice>,

    /// Ticks between logged analytics reports.
    #[arg(long)]
    report_every: Option<u64>,

    /// Levers to buy, in priority order, whenever food allows.
    #[arg(long, value_enum, value_delimiter = ',')]
    auto_upgrade: Vec<LeverChoice>,

    /// Writes the final colony snapshot as JSON to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> RunConfig {
        RunConfig {
            seed: self.seed,
            ticks: self.ticks,
            speed: self.speed,
            production_caste: self.caste,
            growth: self.growth,
            report_every: self.report_every,
            auto_upgrade: self.auto_upgrade.clone(),
        }
    }
}

/// Entry point for the ant colony command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let plan = file.overridden_by(cli.overrides()).resolve();

    let snapshot = run(&plan);
    print_summary(&snapshot);

    if let Some(path) = &cli.output {
        let json = serde_json::to_string(&snapshot).context("failed to encode snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        log::info!("snapshot written to {}", path.display());
    }

    Ok(())
}

fn run(plan: &RunPlan) -> ColonySnapshot {
    let settings = Settings {
        seed: plan.seed,
        growth: plan.growth,
        analytics: analytics::Config::new(plan.report_every, config::TICKS_PER_SECOND as u64 * 10),
        ..Settings::default()
    };
    let mut simulation = Simulation::new(settings);
    simulation.set_production_caste(plan.production_caste);
    let speed = simulation.set_speed(plan.speed);
    simulation.start();
    log::info!(
        "running {} ticks at speed {speed} (seed {:?})",
        plan.ticks,
        plan.seed
    );

    let mut remaining = plan.ticks;
    while remaining >= u64::from(speed) {
        remaining -= simulation.advance(settings.tick_interval);
        buy_upgrades(&mut simulation, plan);
        for report in simulation.drain_reports() {
            log_report(&report);
        }
    }
    simulation.step(remaining);
    simulation.pause();

    simulation.snapshot()
}

fn buy_upgrades(simulation: &mut Simulation, plan: &RunPlan) {
    for lever in &plan.auto_upgrade {
        if let Ok(level) = simulation.purchase_upgrade(*lever) {
            log::info!("auto-upgraded {} to level {level}", lever.definition().name());
        }
    }
}

fn log_report(report: &StatsReport) {
    log::info!(
        "tick {}: delivered {} ({} recent), collected {}, depleted {} tiles, breached {} walls",
        report.tick,
        report.food_delivered,
        report.recent_deliveries,
        report.food_collected,
        report.tiles_depleted,
        report.walls_breached,
    );
}

fn print_summary(snapshot: &ColonySnapshot) {
    println!("tick:        {}", snapshot.tick);
    println!("colony food: {:.2}", snapshot.colony_food);
    println!("food tiles:  {}", snapshot.food_tile_count);
    println!("brood:       {}", snapshot.brood.len());
    for caste in Caste::ALL {
        let count = snapshot
            .ants
            .iter()
            .filter(|ant| ant.caste == caste)
            .count();
        println!("{:<12} {count}", format!("{caste:?}:"));
    }
}
