//! Headless computer-vs-computer batches.

use derive_getters::Getters;
use serde::Serialize;
use tictactoe_engine::{Difficulty, Game, GameError, GameStatus, GameType, Seat, Token};
use tracing::{debug, info, instrument};

/// Parameters for a batch of computer games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfplayConfig {
    /// Difficulty of seat one and seat two.
    pub difficulties: [Difficulty; 2],
    /// Seed of the first game; game `i` uses `base_seed + 2i` and `base_seed + 2i + 1`.
    pub base_seed: u64,
    /// Number of games to play.
    pub games: u32,
    /// Swap who moves first on every other game.
    pub alternate_first: bool,
}

/// Tally of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct SelfplaySummary {
    /// Games played.
    games: u32,
    /// Games won by seat one.
    wins_one: u32,
    /// Games won by seat two.
    wins_two: u32,
    /// Games that filled the board without a winner.
    ties: u32,
}

impl SelfplaySummary {
    fn record(&mut self, game: &Game) {
        self.games += 1;
        match game.status() {
            GameStatus::Won { token, .. } if *token == game.player(Seat::One).token() => {
                self.wins_one += 1
            }
            GameStatus::Won { .. } => self.wins_two += 1,
            GameStatus::Tie | GameStatus::InProgress => self.ties += 1,
        }
    }
}

impl std::fmt::Display for SelfplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "games: {}  Computer 1 wins: {}  Computer 2 wins: {}  ties: {}",
            self.games, self.wins_one, self.wins_two, self.ties
        )
    }
}

/// Plays a batch of seeded computer games and tallies the results.
#[instrument]
pub fn run_batch(config: SelfplayConfig) -> Result<SelfplaySummary, GameError> {
    let mut summary = SelfplaySummary::default();
    for i in 0..config.games {
        let seed = config.base_seed.wrapping_add(2 * u64::from(i));
        let players = GameType::ComputerVsComputer.players(
            [Token::X, Token::O],
            [
                (config.difficulties[0], Some(seed)),
                (config.difficulties[1], Some(seed.wrapping_add(1))),
            ],
        );
        let first = if config.alternate_first && i % 2 == 1 {
            Seat::Two
        } else {
            Seat::One
        };
        let mut game = Game::new(players, first)?;
        game.run_computers()?;
        debug!(game = i, status = ?game.status(), "Finished game");
        summary.record(&game);
    }
    info!(%summary, "Selfplay batch complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_batch_only_ties() {
        let summary = run_batch(SelfplayConfig {
            difficulties: [Difficulty::Hard; 2],
            base_seed: 1000,
            games: 40,
            alternate_first: true,
        })
        .unwrap();
        assert_eq!(summary.games(), &40);
        assert_eq!(summary.ties(), &40);
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = SelfplayConfig {
            difficulties: [Difficulty::Easy, Difficulty::Medium],
            base_seed: 5,
            games: 30,
            alternate_first: false,
        };
        assert_eq!(run_batch(config).unwrap(), run_batch(config).unwrap());
    }

    #[test]
    fn test_hard_first_never_loses_batch() {
        let summary = run_batch(SelfplayConfig {
            difficulties: [Difficulty::Hard, Difficulty::Easy],
            base_seed: 0,
            games: 100,
            alternate_first: false,
        })
        .unwrap();
        assert_eq!(summary.wins_two(), &0);
        assert_eq!(summary.wins_one() + summary.ties(), 100);
    }
}
