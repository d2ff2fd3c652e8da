//! Players: a label and a token, driven either externally or by a strategy.

use super::{Board, GameError, Space, Token, strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Skill tier of a computer player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Random open space.
    #[default]
    Easy,
    /// Win, block, center, then random.
    Medium,
    /// Win, block, then a fixed opening book that never loses when it moves first.
    Hard,
}

/// Decision-making state owned by a computer player.
#[derive(Debug, Clone)]
pub struct Computer {
    difficulty: Difficulty,
    rng: StdRng,
}

impl Computer {
    /// Creates a computer with a pinned seed, or OS entropy if `seed` is `None`.
    #[instrument]
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { difficulty, rng }
    }

    /// Creates a computer whose choices are reproducible from `seed`.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, Some(seed))
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty; the random source is kept.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Chooses a move for `token` on `board`.
    pub fn choose_move(&mut self, token: Token, board: &Board) -> Option<Space> {
        strategy::choose_move(self.difficulty, token, &mut self.rng, board)
    }
}

/// How a player's moves are produced.
#[derive(Debug, Clone)]
pub enum PlayerKind {
    /// Moves are supplied by the driver.
    Human,
    /// Moves are chosen by a strategy.
    Computer(Computer),
}

/// A participant in a game.
#[derive(Debug, Clone)]
pub struct Player {
    label: String,
    token: Token,
    kind: PlayerKind,
}

impl Player {
    /// Creates a human player.
    pub fn human(label: impl Into<String>, token: Token) -> Self {
        Self {
            label: label.into(),
            token,
            kind: PlayerKind::Human,
        }
    }

    /// Creates a computer player.
    pub fn computer(label: impl Into<String>, token: Token, computer: Computer) -> Self {
        Self {
            label: label.into(),
            token,
            kind: PlayerKind::Computer(computer),
        }
    }

    /// Display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Token this player places.
    pub fn token(&self) -> Token {
        self.token
    }

    /// True if a strategy picks this player's moves.
    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }

    /// Difficulty of a computer player.
    pub fn difficulty(&self) -> Option<Difficulty> {
        match &self.kind {
            PlayerKind::Human => None,
            PlayerKind::Computer(computer) => Some(computer.difficulty()),
        }
    }

    /// Sets the token from raw input, rejecting a clash with `opponent`.
    ///
    /// On error the previous token is kept.
    #[instrument(skip(self), fields(player = %self.label))]
    pub fn set_token(&mut self, raw: &str, opponent: Option<Token>) -> Result<Token, GameError> {
        let token = match opponent {
            Some(opponent) => Token::distinct_from(raw, opponent)?,
            None => Token::new(raw)?,
        };
        self.token = token;
        info!(%token, "Set token of {}", self.label);
        Ok(token)
    }

    /// Changes a computer's difficulty. Returns false for humans.
    #[instrument(skip(self), fields(player = %self.label))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        match &mut self.kind {
            PlayerKind::Human => false,
            PlayerKind::Computer(computer) => {
                computer.set_difficulty(difficulty);
                info!("Set difficulty of {} to {}", self.label, difficulty);
                true
            }
        }
    }

    /// Asks this player for a move.
    ///
    /// Humans always return `None`: their moves come from outside. Computers
    /// return `None` only on a full board.
    pub fn decide(&mut self, board: &Board) -> Option<Space> {
        match &mut self.kind {
            PlayerKind::Human => None,
            PlayerKind::Computer(computer) => computer.choose_move(self.token, board),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
    }

    #[test]
    fn test_human_never_decides() {
        let mut human = Player::human("Human", Token::X);
        assert_eq!(human.decide(&Board::default()), None);
        assert!(!human.set_difficulty(Difficulty::Hard));
    }

    #[test]
    fn test_set_token_keeps_previous_on_error() {
        let mut player = Player::human("Player 1", Token::X);
        assert!(player.set_token("12", None).is_err());
        assert_eq!(player.token(), Token::X);
        assert_eq!(
            player.set_token("o", Some(Token::O)),
            Err(GameError::DuplicateToken(Token::O))
        );
        assert_eq!(player.set_token("a", Some(Token::O)).map(|t| t.as_char()), Ok('A'));
        assert_eq!(player.token().as_char(), 'A');
    }

    #[test]
    fn test_computer_difficulty_can_change() {
        let mut player = Player::computer(
            "Computer 1",
            Token::X,
            Computer::seeded(Difficulty::Easy, 0),
        );
        assert!(player.set_difficulty(Difficulty::Medium));
        assert_eq!(player.difficulty(), Some(Difficulty::Medium));
        assert_eq!(player.decide(&Board::default()), Some(Space::CENTER));
    }
}
