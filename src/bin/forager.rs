//! Forager CLI - train a tabular Q-learning forager or play its world by hand
//!
//! This CLI provides:
//! - Training the learner on either embedding variant, followed by one
//!   frozen evaluation episode
//! - A manual-play mode that drives the same world rules without learning

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "forager")]
#[command(version, about = "Tabular Q-learning foraging simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the foraging learner, then run a frozen evaluation episode
    Train(forager::cli::commands::train::TrainArgs),

    /// Play the foraging world manually (no learning)
    Play(forager::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => forager::cli::commands::train::execute(args),
        Commands::Play(args) => forager::cli::commands::play::execute(args),
    }
}
