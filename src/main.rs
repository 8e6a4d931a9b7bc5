//! Huntsim - CLI Entry Point
//!
//! Headless predator-prey runner.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::{Parser, Subcommand};
use huntsim::simulation::ecosystem::Ecosystem;
use huntsim::simulation::export::export_run;
use huntsim::simulation::params::Params;
use huntsim::simulation::stats::StatsHistory;
use huntsim::simulation::stop::StopSignal;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "huntsim")]
#[command(version)]
#[command(about = "Predator-prey simulation on a wrap-around plane")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and export its statistics
    Run {
        /// Parameter file (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of steps to simulate (overrides the parameter file)
        #[arg(short, long)]
        steps: Option<u64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for statistics
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Stop as soon as either species is extinct
        #[arg(long)]
        stop_on_extinction: bool,

        /// Stop the run once this file exists
        #[arg(long)]
        stop_file: Option<PathBuf>,

        /// Log filter (error, warn, info, debug, trace)
        #[arg(long, default_value = "info")]
        log_level: String,

        /// Quiet mode (warnings and errors only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the default parameters to a file
    Init {
        /// Output path
        #[arg(short, long, default_value = "params.json")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            stop_on_extinction,
            stop_file,
            log_level,
            quiet,
        } => {
            let filter = if quiet { "warn" } else { log_level.as_str() };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
                .init();

            let mut params = match config {
                Some(path) => {
                    info!("Loading parameters from {}", path.display());
                    Params::load_from_file(&path)?
                }
                None => Params::default(),
            };
            if let Some(steps) = steps {
                params.max_steps = steps;
            }
            params.stop_on_extinction |= stop_on_extinction;

            run_simulation(&params, seed, output, stop_file)
        }

        Commands::Init { output } => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
            Params::default().save_to_file(&output)?;
            info!("Default parameters written to {}", output.display());
            Ok(())
        }
    }
}

fn run_simulation(
    params: &Params,
    seed: Option<u64>,
    output: PathBuf,
    stop_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match seed {
        Some(s) => {
            info!("Using seed: {s}");
            StdRng::seed_from_u64(s)
        }
        None => StdRng::from_os_rng(),
    };

    let started_at = Local::now();
    let mut ecosystem = Ecosystem::new(params, &mut rng)?;
    let stop = StopSignal::new();
    let mut history = StatsHistory::new();

    let start = Instant::now();
    let summary = ecosystem.run(params, &mut rng, &stop, |report| {
        history.push(report);
        if stop_file.as_ref().is_some_and(|path| path.exists()) {
            stop.request_stop();
        }
    });

    let elapsed = start.elapsed();
    info!(
        "{} steps in {:.2}s ({:.1} steps/s)",
        summary.steps,
        elapsed.as_secs_f64(),
        summary.steps as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    info!(
        "Final population: {} prey, {} predators",
        ecosystem.prey.len(),
        ecosystem.predators.len()
    );

    let files = export_run(&output, &history, params, summary, started_at)?;
    info!("Population statistics: {}", files.population.display());
    info!("Mutation statistics: {}", files.mutations.display());
    info!("Run summary: {}", files.summary.display());

    Ok(())
}
