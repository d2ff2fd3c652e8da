//! Authoritative game state: occupancy, move history, legality, and
//! terminal-condition detection.

use super::patterns::{Pattern, catalog};
use super::{GameError, Space, Token};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Unoccupied.
    Open,
    /// Holds a player's token.
    Taken(Token),
}

impl Square {
    /// Returns the token in this square, if any.
    pub fn token(self) -> Option<Token> {
        match self {
            Square::Open => None,
            Square::Taken(token) => Some(token),
        }
    }

    /// True if nothing has been placed here.
    pub fn is_open(self) -> bool {
        self == Square::Open
    }
}

/// A token placed on a space, recorded in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Where the token was placed.
    pub space: Space,
    /// The token that was placed.
    pub token: Token,
}

impl Move {
    /// Creates a new move.
    pub fn new(space: Space, token: Token) -> Self {
        Self { space, token }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.token, self.space.label())
    }
}

/// 3x3 tic-tac-toe board for two tokens.
///
/// [`Board::place`] is the only mutator. A space goes from open to taken
/// exactly once and every placement is appended to [`Board::moves`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    squares: [Square; 9],
    tokens: [Token; 2],
    moves: Vec<Move>,
}

impl Board {
    /// Creates an empty board for two distinct tokens.
    #[instrument]
    pub fn new(first: Token, second: Token) -> Result<Self, GameError> {
        if first == second {
            return Err(GameError::DuplicateToken(second));
        }
        Ok(Self {
            squares: [Square::Open; 9],
            tokens: [first, second],
            moves: Vec::new(),
        })
    }

    /// Creates an empty board from raw token input such as `"x"` and `"o"`.
    #[instrument]
    pub fn from_keys(first: &str, second: &str) -> Result<Self, GameError> {
        let first = Token::new(first)?;
        let second = Token::distinct_from(second, first)?;
        Self::new(first, second)
    }

    /// Returns the contents of a space.
    pub fn get(&self, space: Space) -> Square {
        self.squares[space.index()]
    }

    /// Returns the contents of the space named by a raw key.
    #[instrument(skip(self))]
    pub fn get_key(&self, key: &str) -> Result<Square, GameError> {
        let space: Space = key.parse()?;
        Ok(self.get(space))
    }

    /// Places `token` on `space` and records the move.
    ///
    /// Fails without mutating if the space is taken or the token is not
    /// one of the two in play.
    #[instrument(skip(self))]
    pub fn place(&mut self, space: Space, token: Token) -> Result<(), GameError> {
        if !self.tokens.contains(&token) {
            warn!(%token, "Token is not in play on this board");
            return Err(GameError::ImproperToken(token.to_string()));
        }
        match self.get(space) {
            Square::Taken(prev) if prev == token => Err(GameError::SpotAlreadySelected(space)),
            Square::Taken(_) => Err(GameError::SpotTakenByOpponent(space)),
            Square::Open => {
                self.squares[space.index()] = Square::Taken(token);
                self.moves.push(Move::new(space, token));
                debug!(turn = self.moves.len(), "Placed token");
                Ok(())
            }
        }
    }

    /// Places `token` on the space named by a raw key.
    #[instrument(skip(self))]
    pub fn place_key(&mut self, key: &str, token: Token) -> Result<(), GameError> {
        let space: Space = key.parse()?;
        self.place(space, token)
    }

    /// The two tokens in play, in the order given at construction.
    pub fn tokens(&self) -> [Token; 2] {
        self.tokens
    }

    /// The token in play that is not `token`.
    pub fn opponent_of(&self, token: Token) -> Token {
        if self.tokens[0] == token {
            self.tokens[1]
        } else {
            self.tokens[0]
        }
    }

    /// Move history in play order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves made so far.
    pub fn turn(&self) -> usize {
        self.moves.len()
    }

    /// True if some winning line holds three of the same token.
    #[instrument(skip(self))]
    pub fn is_over(&self) -> bool {
        self.find_winning_pattern().is_some()
    }

    /// The first winning line (catalog order) held entirely by one token.
    #[instrument(skip(self))]
    pub fn find_winning_pattern(&self) -> Option<Pattern> {
        catalog().winning_patterns().iter().copied().find(|&[a, b, c]| {
            let sq = self.get(a);
            !sq.is_open() && sq == self.get(b) && sq == self.get(c)
        })
    }

    /// The token holding a winning line, if any.
    pub fn winner(&self) -> Option<Token> {
        self.find_winning_pattern()
            .and_then(|[a, _, _]| self.get(a).token())
    }

    /// True if no open spaces remain.
    ///
    /// Evaluated independently of [`Board::is_over`]: a full board with
    /// three in a row is both. Callers check for a win first.
    #[instrument(skip(self))]
    pub fn is_tie(&self) -> bool {
        self.squares.iter().all(|sq| !sq.is_open())
    }

    /// Open spaces in ascending order.
    pub fn available(&self) -> Vec<Space> {
        Space::ALL
            .into_iter()
            .filter(|&space| self.get(space).is_open())
            .collect()
    }

    /// Open corners in catalog order.
    pub fn available_corners(&self) -> Vec<Space> {
        self.open_among(catalog().corners())
    }

    /// Open middle edges in catalog order.
    pub fn available_middles(&self) -> Vec<Space> {
        self.open_among(catalog().middles())
    }

    fn open_among(&self, spaces: &[Space]) -> Vec<Space> {
        spaces
            .iter()
            .copied()
            .filter(|&space| self.get(space).is_open())
            .collect()
    }

    /// A space completing a line where `token` already holds the other two.
    ///
    /// Ties resolve to the first match in catalog order.
    #[instrument(skip(self))]
    pub fn find_winning_move(&self, token: Token) -> Option<Space> {
        let held = Square::Taken(token);
        catalog()
            .partial_patterns()
            .iter()
            .find(|(pair, third)| {
                let [a, b] = pair.spaces();
                self.get(a) == held && self.get(b) == held && self.get(*third).is_open()
            })
            .map(|(_, third)| *third)
    }

    /// The winning move available to the opponent of `token`.
    #[instrument(skip(self))]
    pub fn find_blocking_move(&self, token: Token) -> Option<Space> {
        self.find_winning_move(self.opponent_of(token))
    }

    /// An open corner sharing an open outer line with a corner `token` holds.
    #[instrument(skip(self))]
    pub fn find_adjacent_corner(&self, token: Token) -> Option<Space> {
        let held = Square::Taken(token);
        catalog().outer_patterns().iter().find_map(|&[a, b, c]| {
            if self.get(a) == held && self.get(b).is_open() && self.get(c).is_open() {
                Some(c)
            } else if self.get(c) == held && self.get(b).is_open() && self.get(a).is_open() {
                Some(a)
            } else {
                None
            }
        })
    }

    /// The open corner diagonally opposite a corner `token` holds.
    #[instrument(skip(self))]
    pub fn find_opposite_corner(&self, token: Token) -> Option<Space> {
        let held = Square::Taken(token);
        catalog().diagonal_patterns().iter().find_map(|&[a, _, c]| {
            if self.get(a) == held && self.get(c).is_open() {
                Some(c)
            } else if self.get(c) == held && self.get(a).is_open() {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Formats the board as text; open spaces show their number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let space = Space::ALL[row * 3 + col];
                match self.get(space) {
                    Square::Open => result.push_str(&space.to_string()),
                    Square::Taken(token) => result.push(token.as_char()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Wire shape of a [`Board`], validated by replaying its move log.
#[derive(Debug, Deserialize)]
struct BoardRecord {
    squares: [Square; 9],
    tokens: [Token; 2],
    moves: Vec<Move>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = GameError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let [first, second] = record.tokens;
        let mut board = Board::new(first, second)?;
        for m in &record.moves {
            board.place(m.space, m.token)?;
        }
        if board.squares != record.squares {
            warn!("Board squares disagree with its move log");
            return Err(GameError::InconsistentBoard);
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [Square::Open; 9],
            tokens: [Token::X, Token::O],
            moves: Vec::new(),
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(index: usize) -> Space {
        Space::ALL[index]
    }

    fn board_with(x: &[usize], o: &[usize]) -> Board {
        let mut board = Board::default();
        for &i in x {
            board.place(s(i), Token::X).unwrap();
        }
        for &i in o {
            board.place(s(i), Token::O).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.available(), Space::ALL.to_vec());
        assert!(board.moves().is_empty());
        assert!(!board.is_over());
        assert!(!board.is_tie());
    }

    #[test]
    fn test_failed_place_does_not_mutate() {
        let mut board = board_with(&[0], &[]);
        let before = board.clone();
        assert!(board.place(s(0), Token::X).is_err());
        assert!(board.place(s(0), Token::O).is_err());
        assert!(board.place(s(1), Token::new("Z").unwrap()).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_winner_and_pattern_agree() {
        let board = board_with(&[2, 4, 6], &[0, 1]);
        assert_eq!(board.find_winning_pattern(), Some([s(2), s(4), s(6)]));
        assert_eq!(board.winner(), Some(Token::X));
    }

    #[test]
    fn test_available_subsets_follow_catalog_order() {
        let board = board_with(&[0, 5], &[7]);
        assert_eq!(board.available_corners(), vec![s(2), s(6), s(8)]);
        assert_eq!(board.available_middles(), vec![s(1), s(3)]);
    }

    #[test]
    fn test_winning_move_prefers_catalog_order() {
        // X holds 0, 1 (row completes at 2) and 3 (column completes at 6).
        let board = board_with(&[0, 1, 3], &[]);
        assert_eq!(board.find_winning_move(Token::X), Some(s(2)));
    }

    #[test]
    fn test_display_shows_open_numbers() {
        let board = board_with(&[4], &[0]);
        assert_eq!(board.display(), "O|1|2\n-+-+-\n3|X|5\n-+-+-\n6|7|8");
    }
}
