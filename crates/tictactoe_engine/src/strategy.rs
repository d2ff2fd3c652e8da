//! Computer decision strategies.
//!
//! Every strategy is a pure function of the deciding token, the board, and
//! a caller-owned random source. Reusing a seed with the same board
//! sequence reproduces the same choices.

use super::player::Difficulty;
use super::{Board, Space, Token};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Chooses a move for `me` at the given difficulty.
///
/// Returns `None` only when the board has no open spaces.
#[instrument(skip(rng, board), fields(turn = board.turn()))]
pub fn choose_move<R: Rng + ?Sized>(
    difficulty: Difficulty,
    me: Token,
    rng: &mut R,
    board: &Board,
) -> Option<Space> {
    let space = match difficulty {
        Difficulty::Easy => easy(rng, board),
        Difficulty::Medium => medium(me, rng, board),
        Difficulty::Hard => hard(me, rng, board),
    };
    debug!(?space, "Strategy chose move");
    space
}

/// Uniform random choice among open spaces.
pub fn easy<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<Space> {
    pick(rng, &board.available())
}

/// Win, else block, else center, else random.
pub fn medium<R: Rng + ?Sized>(me: Token, rng: &mut R, board: &Board) -> Option<Space> {
    if let Some(space) = win_or_block(me, board) {
        return Some(space);
    }
    if board.get(Space::CENTER).is_open() {
        debug!("Taking center");
        return Some(Space::CENTER);
    }
    easy(rng, board)
}

/// Win, else block, else follow the turn-indexed decision tree.
pub fn hard<R: Rng + ?Sized>(me: Token, rng: &mut R, board: &Board) -> Option<Space> {
    if let Some(space) = win_or_block(me, board) {
        return Some(space);
    }

    let stage = HardStage::from_turn(board.turn());
    debug!(?stage, "Hard strategy stage");
    let space = match stage {
        HardStage::Opening => opening(rng, board),
        HardStage::FirstResponse => first_response(rng, board),
        HardStage::CornerFollowUp => corner_follow_up(me, board),
        HardStage::TrapDefense => trap_defense(me, rng, board),
        HardStage::Endgame => endgame(rng, board),
    };
    space.or_else(|| easy(rng, board))
}

/// Which branch of the hard decision tree applies, keyed by the number of
/// moves already made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum HardStage {
    /// Turn 0: first move of the game.
    Opening,
    /// Turn 1: reply to the opening move.
    FirstResponse,
    /// Turn 2: second move of the opening player.
    CornerFollowUp,
    /// Turn 3: second reply, guarding against the double-corner trap.
    TrapDefense,
    /// Turn 4 and later.
    Endgame,
}

/// Whether a stage belongs to the player who moved first or second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Even turns: the player who opened the game.
    Opening,
    /// Odd turns: the player who replied.
    Response,
    /// Either player.
    Any,
}

impl HardStage {
    /// Maps a turn number (moves already made) to its stage.
    pub fn from_turn(turn: usize) -> Self {
        match turn {
            0 => Self::Opening,
            1 => Self::FirstResponse,
            2 => Self::CornerFollowUp,
            3 => Self::TrapDefense,
            _ => Self::Endgame,
        }
    }

    /// Turn parity this stage requires.
    pub fn parity(self) -> Parity {
        match self {
            Self::Opening | Self::CornerFollowUp => Parity::Opening,
            Self::FirstResponse | Self::TrapDefense => Parity::Response,
            Self::Endgame => Parity::Any,
        }
    }

    /// Panics if `board` is not at a turn this stage handles.
    ///
    /// A stage run on the wrong turn would silently play a losing move.
    pub fn assert_applies(self, board: &Board) {
        let turn = board.turn();
        assert_eq!(
            Self::from_turn(turn),
            self,
            "hard stage {self:?} invoked on turn {turn}"
        );
        match self.parity() {
            Parity::Opening => assert!(turn % 2 == 0, "turn {turn} is not an opening turn"),
            Parity::Response => assert!(turn % 2 == 1, "turn {turn} is not a response turn"),
            Parity::Any => {}
        }
    }
}

fn opening<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<Space> {
    HardStage::Opening.assert_applies(board);
    pick(rng, &board.available_corners())
}

fn first_response<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<Space> {
    HardStage::FirstResponse.assert_applies(board);
    if board.get(Space::CENTER).is_open() {
        Some(Space::CENTER)
    } else {
        pick(rng, &board.available_corners())
    }
}

fn corner_follow_up(me: Token, board: &Board) -> Option<Space> {
    HardStage::CornerFollowUp.assert_applies(board);
    let opponent = board.opponent_of(me);
    if board.get(Space::CENTER).token() == Some(opponent) {
        board.find_opposite_corner(me)
    } else {
        board.find_adjacent_corner(me)
    }
}

fn trap_defense<R: Rng + ?Sized>(me: Token, rng: &mut R, board: &Board) -> Option<Space> {
    HardStage::TrapDefense.assert_applies(board);
    let opponent_moves: Vec<Space> = board
        .moves()
        .iter()
        .filter(|m| m.token != me)
        .take(2)
        .map(|m| m.space)
        .collect();
    if opponent_moves.len() == 2 && opponent_moves.iter().all(|s| s.is_corner()) {
        debug!(?opponent_moves, "Opponent holds two corners, taking a middle edge");
        pick(rng, &board.available_middles())
    } else {
        easy(rng, board)
    }
}

fn endgame<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<Space> {
    HardStage::Endgame.assert_applies(board);
    if board.get(Space::CENTER).is_open() {
        Some(Space::CENTER)
    } else {
        easy(rng, board)
    }
}

fn win_or_block(me: Token, board: &Board) -> Option<Space> {
    if let Some(space) = board.find_winning_move(me) {
        debug!(%space, "Winning move");
        return Some(space);
    }
    if let Some(space) = board.find_blocking_move(me) {
        debug!(%space, "Blocking move");
        return Some(space);
    }
    None
}

fn pick<R: Rng + ?Sized>(rng: &mut R, spaces: &[Space]) -> Option<Space> {
    spaces.choose(rng).copied()
}
