//! Tic-tac-toe engine - board state, pattern geometry, and computer opponents.
//!
//! # Architecture
//!
//! - **Patterns**: the 8 winning lines and indices derived from them
//! - **Board**: occupancy, move history, legality, win and tie detection
//! - **Players**: humans (moves supplied by the driver) and computers
//!   (moves chosen by an Easy, Medium, or Hard strategy with a seeded RNG)
//! - **Game**: a session alternating two seated players on one board
//!
//! The engine never performs I/O. A driver renders the board, reads input,
//! and re-prompts on recoverable [`GameError`]s.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Difficulty, Game, GameType, Seat, Token};
//!
//! let players = GameType::ComputerVsComputer.players(
//!     [Token::X, Token::O],
//!     [(Difficulty::Hard, Some(1)), (Difficulty::Hard, Some(2))],
//! );
//! let mut game = Game::new(players, Seat::One)?;
//! game.run_computers()?;
//! assert!(game.board().is_tie());
//! # Ok::<(), tictactoe_engine::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod game;
mod patterns;
mod player;
mod space;
mod strategy;
mod token;

// Crate-level exports - Board state
pub use board::{Board, Move, Square};
pub use space::Space;
pub use token::Token;

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Game sessions
pub use game::{Game, GameStatus, GameType, Seat};

// Crate-level exports - Pattern geometry
pub use patterns::{PartialPattern, Pattern, PatternCatalog, catalog};

// Crate-level exports - Players and strategies
pub use player::{Computer, Difficulty, Player};
pub use strategy::{HardStage, Parity, choose_move};
