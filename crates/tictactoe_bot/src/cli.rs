//! Command-line interface for tictactoe_bot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::Difficulty;

/// Tic-tac-toe against a bot, with a monthly win goal
#[derive(Parser, Debug)]
#[command(name = "tictactoe_bot")]
#[command(about = "Play tic-tac-toe against a bot in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to configuration file
        #[arg(short, long, default_value = "tictactoe_bot.toml")]
        config: PathBuf,

        /// Opponent difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Progress file (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Opponent reply delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show saved scores and monthly progress
    Stats {
        /// Path to configuration file
        #[arg(short, long, default_value = "tictactoe_bot.toml")]
        config: PathBuf,

        /// Progress file (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}
