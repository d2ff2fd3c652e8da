//! Game settings loaded from TOML and overridden by command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{Difficulty, Game, GameError, GameType, Player, Seat, Token};
use tracing::{debug, info, instrument};

/// Setup choices for a new game.
///
/// Every field has a default so a settings file may name only what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Which kinds of player fill the two seats.
    game_type: GameType,

    /// Token for seat one.
    token_one: Token,

    /// Token for seat two.
    token_two: Token,

    /// Seat that moves first.
    first: Seat,

    /// Difficulty of seat one when it is a computer.
    difficulty_one: Difficulty,

    /// Difficulty of seat two when it is a computer.
    difficulty_two: Difficulty,

    /// RNG seed for seat one; OS entropy when absent.
    seed_one: Option<u64>,

    /// RNG seed for seat two; OS entropy when absent.
    seed_two: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_type: GameType::default(),
            token_one: Token::X,
            token_two: Token::O,
            first: Seat::One,
            difficulty_one: Difficulty::default(),
            difficulty_two: Difficulty::default(),
            seed_one: None,
            seed_two: None,
        }
    }
}

/// Per-field overrides, typically from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Replaces the game type.
    pub game_type: Option<GameType>,
    /// Replaces seat one's token.
    pub token_one: Option<Token>,
    /// Replaces seat two's token.
    pub token_two: Option<Token>,
    /// Replaces the first seat.
    pub first: Option<Seat>,
    /// Replaces seat one's difficulty.
    pub difficulty_one: Option<Difficulty>,
    /// Replaces seat two's difficulty.
    pub difficulty_two: Option<Difficulty>,
    /// Replaces seat one's seed.
    pub seed_one: Option<u64>,
    /// Replaces seat two's seed.
    pub seed_two: Option<u64>,
}

impl GameSettings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(game_type = %settings.game_type, "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads settings from `path` if given, otherwise uses defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies every override that is set.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(game_type) = overrides.game_type {
            self.game_type = game_type;
        }
        if let Some(token) = overrides.token_one {
            self.token_one = token;
        }
        if let Some(token) = overrides.token_two {
            self.token_two = token;
        }
        if let Some(first) = overrides.first {
            self.first = first;
        }
        if let Some(difficulty) = overrides.difficulty_one {
            self.difficulty_one = difficulty;
        }
        if let Some(difficulty) = overrides.difficulty_two {
            self.difficulty_two = difficulty;
        }
        if overrides.seed_one.is_some() {
            self.seed_one = overrides.seed_one;
        }
        if overrides.seed_two.is_some() {
            self.seed_two = overrides.seed_two;
        }
        self
    }

    /// Creates both players, then applies each computer's difficulty.
    #[instrument(skip(self))]
    pub fn players(&self) -> [Player; 2] {
        let mut players = self.game_type.players(
            [self.token_one, self.token_two],
            [
                (Difficulty::default(), self.seed_one),
                (Difficulty::default(), self.seed_two),
            ],
        );
        let [one, two] = &mut players;
        one.set_difficulty(self.difficulty_one);
        two.set_difficulty(self.difficulty_two);
        players
    }

    /// Seats the configured players in a new game.
    pub fn new_game(&self) -> Result<Game, GameError> {
        self.seat(self.players())
    }

    /// Seats `players` (for example after token edits) in a new game.
    #[instrument(skip(self, players))]
    pub fn seat(&self, players: [Player; 2]) -> Result<Game, GameError> {
        info!("Setting up a {} game", self.game_type);
        Game::new(players, self.first)
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.game_type(), &GameType::HumanVsComputer);
        assert_eq!(settings.token_one(), &Token::X);
        assert_eq!(settings.first(), &Seat::One);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: GameSettings = toml::from_str(
            r#"
game_type = "computer-vs-computer"
token_one = "a"
difficulty_two = "hard"
seed_two = 42
"#,
        )
        .unwrap();
        assert_eq!(settings.game_type(), &GameType::ComputerVsComputer);
        assert_eq!(settings.token_one().as_char(), 'A');
        assert_eq!(settings.token_two(), &Token::O);
        assert_eq!(settings.difficulty_one(), &Difficulty::Easy);
        assert_eq!(settings.difficulty_two(), &Difficulty::Hard);
        assert_eq!(settings.seed_two(), &Some(42));
    }

    #[test]
    fn test_overrides_replace_only_set_fields() {
        let settings = GameSettings::default().with_overrides(SettingsOverrides {
            first: Some(Seat::Two),
            seed_one: Some(9),
            ..Default::default()
        });
        assert_eq!(settings.first(), &Seat::Two);
        assert_eq!(settings.seed_one(), &Some(9));
        assert_eq!(settings.game_type(), &GameType::HumanVsComputer);
    }

    #[test]
    fn test_players_carry_difficulty() {
        let settings = GameSettings::default().with_overrides(SettingsOverrides {
            difficulty_two: Some(Difficulty::Hard),
            ..Default::default()
        });
        let [human, computer] = settings.players();
        assert!(!human.is_computer());
        assert_eq!(computer.difficulty(), Some(Difficulty::Hard));
    }

    #[test]
    fn test_duplicate_tokens_fail_at_game_setup() {
        let settings = GameSettings::default().with_overrides(SettingsOverrides {
            token_two: Some(Token::X),
            ..Default::default()
        });
        assert_eq!(
            settings.new_game().unwrap_err(),
            GameError::DuplicateToken(Token::X)
        );
    }
}
