//! Quiz battle balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Default: 1000 runs, medium tier
//!   cargo run --bin simulate -- -n 100 --tier boss    # 100 runs against dragons
//!   cargo run --bin simulate -- --seed 42 --json      # Reproducible, with JSON report

use clap::Parser;
use quiz_battle::combat::Tier;
use quiz_battle::simulator::{run_simulation, SimConfig, UpgradePolicy};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Quiz Battle balance simulator", version)]
struct Args {
    /// Number of simulated players
    #[arg(short = 'n', long = "runs", default_value_t = 1000)]
    runs: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Chance of answering correctly (0.0 - 1.0)
    #[arg(short, long, default_value_t = 0.75)]
    accuracy: f64,

    /// Battle tier: easy, medium, hard or boss
    #[arg(short, long, default_value = "medium")]
    tier: Tier,

    /// Level-up policy: max-hp, damage, gold-bonus, balanced or adaptive
    #[arg(short, long, default_value = "balanced")]
    policy: UpgradePolicy,

    /// Battles fought by each simulated player
    #[arg(short, long, default_value_t = 50)]
    battles: u32,

    /// Never buy or drink potions
    #[arg(long)]
    no_potions: bool,

    /// Save a JSON report (to the given path, or a timestamped file)
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    json: Option<PathBuf>,

    /// Print one line per run
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        accuracy: args.accuracy,
        tier: args.tier,
        upgrade_policy: args.policy,
        battles_per_run: args.battles,
        use_potions: !args.no_potions,
        verbosity: if args.verbose { 2 } else { 1 },
        ..SimConfig::default()
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              QUIZ BATTLE BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Tier:           {}", config.tier);
    println!("  Accuracy:       {:.0}%", config.clamped_accuracy() * 100.0);
    println!("  Upgrades:       {}", config.upgrade_policy);
    println!("  Battles/Run:    {}", config.battles_per_run);
    println!("  Potions:        {}", config.use_potions);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if let Some(path) = args.json {
        let path = if path.as_os_str().is_empty() {
            PathBuf::from(format!(
                "sim_report_{}.json",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        } else {
            path
        };
        let json = report
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        std::fs::write(&path, json)?;
        println!("JSON report saved to: {}", path.display());
    }
    Ok(())
}
