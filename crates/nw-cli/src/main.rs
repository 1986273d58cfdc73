//! Moderator console for the Nachtwache session engine.

mod commands;
mod store;
mod timer;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nw",
    about = "Nachtwache — a moderator console for werewolf nights",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive moderator session
    Play {
        /// Session file to resume from and persist to
        #[arg(short, long, default_value = store::DEFAULT_FILE)]
        file: PathBuf,

        /// RNG seed for the role deal
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Table size for a fresh session, 5-20 (ignored when resuming)
        #[arg(short, long)]
        players: Option<u32>,
    },

    /// List the role catalog and camp totals
    Roles,

    /// List the table rules and their defaults
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            file,
            seed,
            players,
        } => commands::play::run(&file, seed, players),
        Commands::Roles => commands::roles::run(),
        Commands::Rules => commands::rules::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
