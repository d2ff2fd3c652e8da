//! Player tokens: single uppercase letters.

use super::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Single-letter marker a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "char", into = "char")]
#[display("{}", _0)]
pub struct Token(char);

impl Token {
    /// Conventional first token.
    pub const X: Token = Token('X');
    /// Conventional second token.
    pub const O: Token = Token('O');

    /// Normalizes raw input (`"x"`, `" X "`) into a token.
    #[instrument]
    pub fn new(raw: &str) -> Result<Self, GameError> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c)
                .map_err(|_| GameError::ImproperToken(raw.to_string())),
            _ => Err(GameError::ImproperToken(raw.to_string())),
        }
    }

    /// Normalizes a single character into a token.
    pub fn from_char(c: char) -> Result<Self, GameError> {
        if c.is_ascii_alphabetic() {
            Ok(Token(c.to_ascii_uppercase()))
        } else {
            Err(GameError::ImproperToken(c.to_string()))
        }
    }

    /// Normalizes raw input and rejects it if it collides with `opponent`.
    #[instrument]
    pub fn distinct_from(raw: &str, opponent: Token) -> Result<Self, GameError> {
        let token = Self::new(raw)?;
        if token == opponent {
            return Err(GameError::DuplicateToken(token));
        }
        Ok(token)
    }

    /// Returns the letter.
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl FromStr for Token {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Token::new(raw)
    }
}

impl TryFrom<char> for Token {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Token::from_char(c)
    }
}

impl From<Token> for char {
    fn from(token: Token) -> Self {
        token.0
    }
}
