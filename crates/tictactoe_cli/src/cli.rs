//! Command-line interface for the tic-tac-toe driver.

use super::settings::SettingsOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{Difficulty, GameType, Seat, Token};

/// Tic-tac-toe against humans or seeded computer opponents
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with Easy, Medium, and Hard computers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play(PlayArgs),

    /// Play a batch of computer-vs-computer games and print the tally
    Selfplay {
        /// Difficulty of computer 1
        #[arg(long, default_value = "hard")]
        difficulty_one: Difficulty,

        /// Difficulty of computer 2
        #[arg(long, default_value = "hard")]
        difficulty_two: Difficulty,

        /// Seed of the first game
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Let computer 2 move first on every other game
        #[arg(long)]
        alternate_first: bool,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options for an interactive game.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Game type (human-vs-computer, human-vs-human, computer-vs-computer)
    #[arg(long)]
    pub mode: Option<GameType>,

    /// Token for player 1
    #[arg(long)]
    pub token_one: Option<Token>,

    /// Token for player 2
    #[arg(long)]
    pub token_two: Option<Token>,

    /// Which player moves first (one or two)
    #[arg(long)]
    pub first: Option<Seat>,

    /// Difficulty of player 1 when it is a computer
    #[arg(long)]
    pub difficulty_one: Option<Difficulty>,

    /// Difficulty of player 2 when it is a computer
    #[arg(long)]
    pub difficulty_two: Option<Difficulty>,

    /// RNG seed for player 1
    #[arg(long)]
    pub seed_one: Option<u64>,

    /// RNG seed for player 2
    #[arg(long)]
    pub seed_two: Option<u64>,

    /// Ask each human for a token before the game starts
    #[arg(long)]
    pub ask_tokens: bool,

    /// Ask for each computer's difficulty before the game starts
    #[arg(long)]
    pub ask_difficulty: bool,
}

impl PlayArgs {
    /// Flags that replace settings-file values.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            game_type: self.mode,
            token_one: self.token_one,
            token_two: self.token_two,
            first: self.first,
            difficulty_one: self.difficulty_one,
            difficulty_two: self.difficulty_two,
            seed_one: self.seed_one,
            seed_two: self.seed_two,
        }
    }
}
