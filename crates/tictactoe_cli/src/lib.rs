//! Terminal driver for the tic-tac-toe engine.
//!
//! The engine owns every rule; this crate only parses flags and settings,
//! renders the board as text, reads moves line by line, and runs headless
//! computer batches.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod driver;
pub mod selfplay;
pub mod settings;

pub use cli::{Cli, Command, PlayArgs};
pub use driver::{Driver, QUIT_KEY, SessionEnd};
pub use selfplay::{SelfplayConfig, SelfplaySummary, run_batch};
pub use settings::{ConfigError, GameSettings, SettingsOverrides};
