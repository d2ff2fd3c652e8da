//! End-to-end tests for game sessions.

use tictactoe_engine::{Difficulty, Game, GameError, GameStatus, GameType, Player, Seat, Space, Token};

fn s(index: usize) -> Space {
    Space::ALL[index]
}

#[test]
fn test_forced_moves_reach_expected_win() {
    let players = GameType::ComputerVsComputer.players(
        [Token::X, Token::O],
        [(Difficulty::Easy, Some(1)), (Difficulty::Easy, Some(2))],
    );
    let mut game = Game::new(players, Seat::One).unwrap();

    let order = [0, 1, 2, 3, 4, 5, 7, 6, 8];
    for (i, &space) in order.iter().enumerate() {
        assert_eq!(game.status(), &GameStatus::InProgress, "ended early at move {i}");
        game.apply(s(space)).unwrap();
    }

    assert!(game.board().is_over());
    assert_eq!(
        game.status(),
        &GameStatus::Won {
            token: Token::X,
            pattern: [s(0), s(4), s(8)],
        }
    );
    assert_eq!(game.winner().map(Player::label), Some("Computer 1"));
    assert_eq!(game.board().find_winning_pattern(), Some([s(0), s(4), s(8)]));
}

#[test]
fn test_human_game_ends_in_tie() {
    let players = GameType::HumanVsHuman.players([Token::X, Token::O], [(Difficulty::Easy, None); 2]);
    let mut game = Game::new(players, Seat::One).unwrap();
    for key in ["0", "1", "2", "4", "3", "5", "7", "6", "8"] {
        game.apply_key(key).unwrap();
    }
    assert_eq!(game.status(), &GameStatus::Tie);
    assert!(game.winner().is_none());
    assert_eq!(game.apply_key("0"), Err(GameError::GameOver));
}

#[test]
fn test_second_seat_can_go_first() {
    let players = GameType::HumanVsHuman.players([Token::X, Token::O], [(Difficulty::Easy, None); 2]);
    let mut game = Game::new(players, Seat::Two).unwrap();
    assert_eq!(game.current_player().map(Player::label), Some("Player 2"));
    game.apply(Space::CENTER).unwrap();
    assert_eq!(game.board().moves()[0].token, Token::O);
    assert_eq!(game.current_player().map(Player::label), Some("Player 1"));
}

#[test]
fn test_human_vs_computer_alternates() {
    let players = GameType::HumanVsComputer.players(
        [Token::new("h").unwrap(), Token::new("c").unwrap()],
        [(Difficulty::Easy, None), (Difficulty::Medium, Some(4))],
    );
    let mut game = Game::new(players, Seat::One).unwrap();
    assert_eq!(game.player(Seat::One).label(), "Human");
    assert_eq!(game.player(Seat::Two).difficulty(), Some(Difficulty::Medium));

    game.apply(s(0)).unwrap();
    assert_eq!(game.advance_computer().unwrap(), Some(Space::CENTER));
    assert_eq!(game.run_computers().unwrap(), &GameStatus::InProgress);
    assert_eq!(game.to_move(), Some(Seat::One));
}
