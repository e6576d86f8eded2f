//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze battle balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 500 runs x 20 battles
//!   cargo run --bin simulate -- -n 100 -b 50      # 100 runs of 50 battles
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use anyhow::{bail, Context, Result};
use duel::logging::init_stderr_logging;
use duel::simulator::{run_simulation, PlayerPolicy, SimConfig};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some((config, write_json)) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let filter = if config.verbosity >= 2 { "debug" } else { "warn" };
    init_stderr_logging(filter);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ELEMENTAL DUEL BALANCE SIMULATOR                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Battles/Run:    {}", config.battles_per_run);
    println!("  Max Rounds:     {}", config.max_rounds_per_battle);
    println!("  Policy:         {}", config.policy.name());
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "duel_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write JSON report {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} needs a value", flag),
    }
}

/// `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<(SimConfig, bool)>> {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "-b" | "--battles" => {
                config.battles_per_run = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "-r" | "--max-rounds" => {
                config.max_rounds_per_battle = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(
                    value(args, i, flag)?
                        .parse()
                        .with_context(|| format!("invalid {}", flag))?,
                );
                i += 1;
            }
            "-p" | "--policy" => {
                let name = value(args, i, flag)?;
                config.policy = match PlayerPolicy::from_name(name) {
                    Some(policy) => policy,
                    None => bail!("unknown policy `{}` (expected random or weighted)", name),
                };
                i += 1;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                write_json = true;
            }
            "--quick" => {
                config = SimConfig {
                    policy: config.policy,
                    seed: config.seed,
                    ..SimConfig::quick()
                };
            }
            "--endurance" => {
                config = SimConfig {
                    policy: config.policy,
                    seed: config.seed,
                    ..SimConfig::endurance()
                };
            }
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown option `{}` (see --help)", other),
        }
        i += 1;
    }

    Ok(Some((config, write_json)))
}

fn print_help() {
    println!("Elemental Duel Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulation runs (default: 500)");
    println!("    -b, --battles <B>     Battles per run (default: 20)");
    println!("    -r, --max-rounds <R>  Round cap per battle (default: 200)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -p, --policy <P>      Player policy: random | weighted (default: random)");
    println!("    -v, --verbose         Per-run output on stderr");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (50 runs x 10 battles)");
    println!("    --endurance           Long streaks (200 runs x 100 battles)");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                       # Default run");
    println!("    cargo run --bin simulate -- -n 100 -b 50      # 100 runs of 50 battles");
    println!("    cargo run --bin simulate -- --seed 42         # Reproducible");
    println!("    cargo run --bin simulate -- -p weighted       # Mirror the opponent");
}
