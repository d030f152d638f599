//! Command-line player for Delve text adventures.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use delve_engine::SessionConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "delve",
    about = "Delve: play text adventures described in JSON",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log filter (e.g. "debug", "delve_engine=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a world interactively
    Play {
        /// World file (JSON)
        #[arg(short, long)]
        world: PathBuf,

        /// Include NPC notes and inventory in every look
        #[arg(short, long)]
        verbose: bool,

        /// Start with narration turned off. Only matters to front ends that
        /// install a narrator; this binary ships without one
        #[arg(long)]
        no_narration: bool,
    },

    /// Validate a world file and report every problem
    Check {
        /// World file (JSON)
        #[arg(short, long)]
        world: PathBuf,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Play {
            world,
            verbose,
            no_narration,
        } => {
            let config = SessionConfig::new()
                .with_verbose_look(verbose)
                .with_narration(!no_narration);
            commands::play::run(&world, config)
        }
        Commands::Check { world } => commands::check::run(&world),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
