//! tictactoe_bot - terminal tic-tac-toe against a bot.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command as CliCommand};
use std::io::BufRead;
use std::path::PathBuf;
use tictactoe_bot::{
    AppConfig, Clock, Command, Driver, GameSession, HELP, JsonFileStore, MONTHLY_GOAL, ScoreStore,
    SystemClock, TerminalPresenter, parse_command,
};
use tictactoe_engine::{Difficulty, MovePolicy};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        CliCommand::Play {
            config,
            difficulty,
            store,
            delay_ms,
        } => run_play(config, difficulty, store, delay_ms).await,
        CliCommand::Stats { config, store } => run_stats(config, store),
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Play in the terminal until the player quits.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    difficulty: Option<Difficulty>,
    store: Option<PathBuf>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let config = AppConfig::load_or_default(&config_path)
        .context("Failed to load configuration")?
        .with_overrides(store, difficulty, delay_ms);
    info!(?config, "Starting game");

    println!("{}", HELP);

    let store = JsonFileStore::new(config.store_path());
    let presenter = TerminalPresenter::new(std::io::stdout());
    let mut session = GameSession::new(store, presenter, SystemClock, MovePolicy::from_entropy());
    session.set_difficulty(*config.difficulty());
    println!("Difficulty: {}", session.difficulty());

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx);

    let session = Driver::new(session, config.reply_delay())
        .run(rx)
        .await
        .context("Game engine failed")?;

    let score = session.score();
    println!(
        "Final score: you {} / opponent {}. Monthly goal {}/{}.",
        score.player_wins(),
        score.opponent_wins(),
        score.monthly_wins(),
        MONTHLY_GOAL
    );
    Ok(())
}

/// Reads stdin on a plain thread; the driver stops on `q` or end of input.
fn spawn_input_reader(tx: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            };
            match parse_command(&line) {
                Some(command) => {
                    debug!(?command, "Input parsed");
                    if tx.send(command).is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => println!("Unrecognized input '{}'.\n{}", line.trim(), HELP),
            }
        }
        // End of input counts as quitting.
        let _ = tx.send(Command::Quit);
    });
}

/// Print saved progress without starting a game.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
fn run_stats(config_path: PathBuf, store: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(&config_path)
        .context("Failed to load configuration")?
        .with_overrides(store, None, None);

    let store = JsonFileStore::new(config.store_path());
    let Some(record) = store.load().context("Failed to read saved progress")? else {
        println!("No progress saved yet at {}.", store.path().display());
        return Ok(());
    };

    println!("Saved progress for {}:", record.period());
    println!(
        "  You {} / opponent {}",
        record.player_wins(),
        record.opponent_wins()
    );
    println!(
        "  Monthly goal {}/{} wins ({}%)",
        record.monthly_wins(),
        MONTHLY_GOAL,
        record.progress_percent()
    );
    if record.period() != SystemClock.period() {
        println!("  This record is from an earlier month; the next game starts from zero.");
    }
    Ok(())
}
