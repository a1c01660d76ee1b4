//! ridkit CLI - Resolve runtime-specific assets from a dependency manifest

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, fallbacks, resolve};
use config::RidkitConfig;

#[derive(Parser)]
#[command(name = "ridkit")]
#[command(about = "Pick the platform-specific assets a deployed application should load", long_about = None)]
#[command(version)]
struct Cli {
    /// Log resolution decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve assets for a runtime identifier
    Resolve(resolve::ResolveArgs),

    /// Show the candidate runtime sequence for a runtime identifier
    Fallbacks {
        /// Path to the dependency context snapshot (TOML)
        manifest: String,

        /// Runtime identifier
        rid: String,
    },

    /// Load and validate a dependency context snapshot
    Check {
        /// Path to the dependency context snapshot (TOML)
        manifest: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RidkitConfig::load()?;
    logging::init_logging(&config.log_filter, cli.verbose);

    match cli.command {
        Commands::Resolve(args) => resolve::run(args, &config),
        Commands::Fallbacks { manifest, rid } => fallbacks::run(&manifest, &rid),
        Commands::Check { manifest } => check::run(&manifest),
    }
}
