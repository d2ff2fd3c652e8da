//! Tic-tac-toe - terminal driver
//!
//! Interactive play and headless computer batches.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tictactoe_cli::{Cli, Command, Driver, GameSettings, PlayArgs, SelfplayConfig, run_batch};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Command::Play(args) => run_play(args),
        Command::Selfplay {
            difficulty_one,
            difficulty_two,
            seed,
            games,
            alternate_first,
            json,
        } => run_selfplay(
            SelfplayConfig {
                difficulties: [difficulty_one, difficulty_two],
                base_seed: seed,
                games,
                alternate_first,
            },
            json,
        ),
    }
}

/// Logs go to `log_file` at info level, or to stderr at warn level so they
/// stay out of the way of the board.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Run an interactive game on stdin/stdout
#[instrument(skip_all)]
fn run_play(args: PlayArgs) -> Result<()> {
    let settings = GameSettings::load(args.config.as_deref())?.with_overrides(args.overrides());

    let stdin = std::io::stdin();
    let mut driver = Driver::new(stdin.lock(), std::io::stdout());

    let mut players = settings.players();
    if args.ask_tokens && !driver.choose_tokens(&mut players)? {
        return Ok(());
    }
    if args.ask_difficulty
        && settings.game_type().has_computer()
        && !driver.choose_difficulties(&mut players)?
    {
        return Ok(());
    }

    let ends = driver.play_series(&settings, players)?;
    info!(games = ends.len(), "Session ended");
    Ok(())
}

/// Run a headless batch of computer games
#[instrument]
fn run_selfplay(config: SelfplayConfig, json: bool) -> Result<()> {
    let summary = run_batch(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}
