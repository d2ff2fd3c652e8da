//! Game session: two players alternating on one board.

use super::patterns::Pattern;
use super::player::{Computer, Difficulty, Player};
use super::{Board, GameError, Space, Token};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Which of the two seats a player occupies.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Seat {
    /// First seat (player 1).
    #[default]
    #[strum(to_string = "one", serialize = "1")]
    One,
    /// Second seat (player 2).
    #[strum(to_string = "two", serialize = "2")]
    Two,
}

impl Seat {
    /// The other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Which kinds of player fill the two seats.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GameType {
    /// A human against a computer.
    #[default]
    HumanVsComputer,
    /// Two humans sharing the driver.
    HumanVsHuman,
    /// Two computers.
    ComputerVsComputer,
}

impl GameType {
    /// True if at least one seat is a computer.
    pub fn has_computer(self) -> bool {
        self != GameType::HumanVsHuman
    }

    /// Creates the two players for this game type.
    ///
    /// `computers` supplies difficulty and seed per seat; it is ignored for
    /// human seats.
    #[instrument]
    pub fn players(
        self,
        tokens: [Token; 2],
        computers: [(Difficulty, Option<u64>); 2],
    ) -> [Player; 2] {
        let computer = |seat: usize, label: &str| {
            let (difficulty, seed) = computers[seat];
            Player::computer(label, tokens[seat], Computer::new(difficulty, seed))
        };
        match self {
            GameType::HumanVsComputer => [Player::human("Human", tokens[0]), computer(1, "Computer")],
            GameType::HumanVsHuman => [
                Player::human("Player 1", tokens[0]),
                Player::human("Player 2", tokens[1]),
            ],
            GameType::ComputerVsComputer => [computer(0, "Computer 1"), computer(1, "Computer 2")],
        }
    }
}

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves remain and nobody has won.
    InProgress,
    /// A token holds a winning line.
    Won {
        /// The winning token.
        token: Token,
        /// The line it holds.
        pattern: Pattern,
    },
    /// The board filled without a winner.
    Tie,
}

impl GameStatus {
    /// True once the game has ended.
    pub fn is_finished(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

/// A single game between two seated players.
///
/// Turns alternate strictly starting from `first`. A win is checked before a
/// tie, so a full board with three in a row is reported as a win.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    first: Seat,
    status: GameStatus,
}

impl Game {
    /// Seats two players with distinct tokens; `first` moves first.
    #[instrument(skip(players), fields(one = %players[0], two = %players[1]))]
    pub fn new(players: [Player; 2], first: Seat) -> Result<Self, GameError> {
        let order = [players[first.index()].token(), players[first.other().index()].token()];
        let board = Board::new(order[0], order[1])?;
        info!("{} is going first", players[first.index()]);
        Ok(Self {
            board,
            players,
            first,
            status: GameStatus::InProgress,
        })
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Both players by seat.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// The player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Ends the session, handing back both players for another game.
    ///
    /// Computers keep their random state, so a seeded rematch does not
    /// replay the previous game.
    pub fn into_players(self) -> [Player; 2] {
        self.players
    }

    /// Current outcome.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// The seat to move, or `None` once the game has ended.
    pub fn to_move(&self) -> Option<Seat> {
        if self.status.is_finished() {
            return None;
        }
        if self.board.turn() % 2 == 0 {
            Some(self.first)
        } else {
            Some(self.first.other())
        }
    }

    /// The player to move, or `None` once the game has ended.
    pub fn current_player(&self) -> Option<&Player> {
        self.to_move().map(|seat| self.player(seat))
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Won { token, .. } => self.players.iter().find(|p| p.token() == token),
            _ => None,
        }
    }

    /// Places the current player's token on `space`.
    ///
    /// Illegal moves leave the game unchanged so the driver can re-prompt.
    #[instrument(skip(self))]
    pub fn apply(&mut self, space: Space) -> Result<&GameStatus, GameError> {
        let seat = self.to_move().ok_or(GameError::GameOver)?;
        let player = &self.players[seat.index()];
        self.board.place(space, player.token())?;
        info!("{} placed a token on {}", player, space);
        self.refresh_status();
        Ok(&self.status)
    }

    /// Places the current player's token on the space named by a raw key.
    #[instrument(skip(self))]
    pub fn apply_key(&mut self, key: &str) -> Result<&GameStatus, GameError> {
        let space: Space = key.parse()?;
        self.apply(space)
    }

    /// Lets a computer in the current seat choose and play its move.
    ///
    /// Returns `Ok(None)` when a human is to move.
    #[instrument(skip(self))]
    pub fn advance_computer(&mut self) -> Result<Option<Space>, GameError> {
        let seat = self.to_move().ok_or(GameError::GameOver)?;
        let player = &mut self.players[seat.index()];
        let Some(space) = player.decide(&self.board) else {
            debug!(player = %player, "Waiting for an external move");
            return Ok(None);
        };
        self.apply(space)?;
        Ok(Some(space))
    }

    /// Advances computer seats until the game ends or a human must move.
    #[instrument(skip(self))]
    pub fn run_computers(&mut self) -> Result<&GameStatus, GameError> {
        while !self.status.is_finished() {
            if self.advance_computer()?.is_none() {
                break;
            }
        }
        Ok(&self.status)
    }

    fn refresh_status(&mut self) {
        if let (Some(pattern), Some(token)) =
            (self.board.find_winning_pattern(), self.board.winner())
        {
            self.status = GameStatus::Won { token, pattern };
            if let Some(winner) = self.winner() {
                info!(?pattern, "{} wins", winner);
            }
        } else if self.board.is_tie() {
            self.status = GameStatus::Tie;
            info!("Game ended in a tie");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_game(first: Seat) -> Game {
        let players =
            GameType::HumanVsHuman.players([Token::X, Token::O], [(Difficulty::Easy, None); 2]);
        Game::new(players, first).unwrap()
    }

    #[test]
    fn test_turns_alternate_from_first_seat() {
        let mut game = human_game(Seat::Two);
        assert_eq!(game.to_move(), Some(Seat::Two));
        assert_eq!(game.board().tokens(), [Token::O, Token::X]);
        game.apply_key("4").unwrap();
        assert_eq!(game.board().get(Space::CENTER).token(), Some(Token::O));
        assert_eq!(game.to_move(), Some(Seat::One));
    }

    #[test]
    fn test_duplicate_tokens_rejected() {
        let players = [Player::human("A", Token::X), Player::human("B", Token::X)];
        assert_eq!(
            Game::new(players, Seat::One).unwrap_err(),
            GameError::DuplicateToken(Token::X)
        );
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut game = human_game(Seat::One);
        game.apply_key("0").unwrap();
        assert_eq!(
            game.apply_key("0").unwrap_err(),
            GameError::SpotTakenByOpponent(Space::ALL[0])
        );
        assert!(matches!(game.apply_key("q"), Err(GameError::KeyNotOnBoard(_))));
        assert_eq!(game.to_move(), Some(Seat::Two));
        assert_eq!(game.board().turn(), 1);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut game = human_game(Seat::One);
        for key in ["0", "3", "1", "4", "2"] {
            game.apply_key(key).unwrap();
        }
        assert_eq!(game.winner().map(Player::label), Some("Player 1"));
        assert_eq!(game.to_move(), None);
        assert_eq!(game.apply_key("8").unwrap_err(), GameError::GameOver);
        assert_eq!(game.advance_computer().unwrap_err(), GameError::GameOver);
    }

    #[test]
    fn test_game_type_reports_computer_seats() {
        assert!(GameType::HumanVsComputer.has_computer());
        assert!(GameType::ComputerVsComputer.has_computer());
        assert!(!GameType::HumanVsHuman.has_computer());
    }

    #[test]
    fn test_rematch_keeps_players() {
        let mut game = human_game(Seat::One);
        game.apply_key("4").unwrap();
        let players = game.into_players();
        assert_eq!(players[0].label(), "Player 1");
        assert_eq!(players[1].token(), Token::O);

        let rematch = Game::new(players, Seat::Two).unwrap();
        assert_eq!(rematch.board().turn(), 0);
        assert_eq!(rematch.to_move(), Some(Seat::Two));
    }

    #[test]
    fn test_human_seat_blocks_computer_advance() {
        let players = GameType::HumanVsComputer
            .players([Token::X, Token::O], [(Difficulty::Easy, None), (Difficulty::Hard, Some(5))]);
        let mut game = Game::new(players, Seat::One).unwrap();
        assert_eq!(game.advance_computer(), Ok(None));
        game.apply(Space::CENTER).unwrap();
        let reply = game.advance_computer().unwrap().unwrap();
        assert!(reply.is_corner());
        assert_eq!(game.to_move(), Some(Seat::One));
    }
}
