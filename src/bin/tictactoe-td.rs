//! tictactoe-td CLI - Tabular TD(0) agents for Tic-Tac-Toe
//!
//! This CLI provides:
//! - Self-play training of the X and O value tables
//! - Interactive games against a freshly trained agent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tictactoe-td")]
#[command(version, about = "Temporal-difference learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train X and O agents against each other
    Train(tictactoe_td::cli::commands::train::TrainArgs),

    /// Train, then play against the trained agent
    Play(tictactoe_td::cli::commands::play::PlayArgs),
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Train(args) => tictactoe_td::cli::commands::train::execute(args),
        Commands::Play(args) => tictactoe_td::cli::commands::play::execute(args),
    }
}
