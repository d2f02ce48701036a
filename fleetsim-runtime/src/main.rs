//! FleetSim
//!
//! Simulates a fleet of vehicles independently emitting synthetic
//! telemetry, to exercise ingestion backends without real hardware.

use anyhow::Result;
use clap::Parser;
use fleetsim_runtime::config::FleetConfig;
use fleetsim_runtime::fleet;
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fleetsim", about = "Synthetic vehicle fleet telemetry simulator")]
struct Args {
    /// Fleet configuration file (TOML). Without it a built-in demo fleet
    /// of five vehicles emits to stdout.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base RNG seed; overrides the seed from the configuration file.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FleetConfig::load(path)?,
        None => {
            info!("no configuration file given, using the built-in demo fleet");
            FleetConfig::default_fleet(5)
        }
    };

    let seed = args
        .seed
        .or(config.simulation.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    info!("base seed {}", seed);

    fleet::run(config, seed).await
}
