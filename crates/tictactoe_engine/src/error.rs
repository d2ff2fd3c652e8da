//! Error types for the tic-tac-toe engine.

use super::{Space, Token};

/// Error raised by board, token, and session operations.
///
/// Every variant is recoverable: the failed call performs no mutation and
/// the caller is expected to re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The key could not be parsed into a space 0-8.
    #[display("Key {:?} is not on the board (expected 0-8)", _0)]
    KeyNotOnBoard(String),

    /// The space already holds the token being placed.
    #[display("Space {} is already selected", _0)]
    SpotAlreadySelected(Space),

    /// The space holds the other player's token.
    #[display("Space {} is taken by the opponent", _0)]
    SpotTakenByOpponent(Space),

    /// The input is not a single letter, or the token is not in play.
    #[display("{:?} is not a valid token (expected a single letter A-Z)", _0)]
    ImproperToken(String),

    /// Both players would share the same token.
    #[display("Token {} is already used by the opponent", _0)]
    DuplicateToken(Token),

    /// A stored board's squares do not match its move log.
    #[display("Board squares do not match its move history")]
    InconsistentBoard,

    /// A move was submitted after the game finished.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for GameError {}
