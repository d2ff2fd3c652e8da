//! Tests for settings files and command-line overrides.

use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;
use tictactoe_cli::{Cli, Command, GameSettings};
use tictactoe_engine::{Difficulty, GameType, Seat, Token};

fn settings_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_settings_from_file() {
    let file = settings_file(
        r#"
game_type = "human-vs-human"
token_one = "a"
token_two = "b"
first = "two"
"#,
    );

    let settings = GameSettings::load(Some(file.path())).unwrap();
    assert_eq!(settings.game_type(), &GameType::HumanVsHuman);
    assert_eq!(settings.first(), &Seat::Two);

    let game = settings.new_game().unwrap();
    assert_eq!(game.current_player().map(|p| p.label()), Some("Player 2"));
    assert_eq!(game.board().tokens()[0].as_char(), 'B');
}

#[test]
fn test_missing_file_is_config_error() {
    let err = GameSettings::from_file("/nonexistent/tictactoe.toml").unwrap_err();
    assert!(err.message.contains("Failed to read settings file"));
}

#[test]
fn test_malformed_file_is_config_error() {
    let file = settings_file("difficulty_one = \"impossible\"\n");
    let err = GameSettings::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse settings"));
}

#[test]
fn test_no_file_uses_defaults() {
    assert_eq!(GameSettings::load(None).unwrap(), GameSettings::default());
}

#[test]
fn test_play_flags_override_file() {
    let file = settings_file("game_type = \"computer-vs-computer\"\nseed_one = 1\n");
    let path = file.path().to_string_lossy().to_string();

    let cli = Cli::try_parse_from([
        "tictactoe",
        "play",
        "--config",
        &path,
        "--token-one",
        "z",
        "--difficulty-two",
        "Hard",
        "--first",
        "2",
    ])
    .unwrap();
    let Command::Play(args) = cli.command else {
        panic!("expected play");
    };

    let settings = GameSettings::load(args.config.as_deref())
        .unwrap()
        .with_overrides(args.overrides());
    assert_eq!(settings.game_type(), &GameType::ComputerVsComputer);
    assert_eq!(settings.token_one(), &Token::new("Z").unwrap());
    assert_eq!(settings.difficulty_two(), &Difficulty::Hard);
    assert_eq!(settings.first(), &Seat::Two);
    assert_eq!(settings.seed_one(), &Some(1));
}

#[test]
fn test_play_rejects_bad_token_flag() {
    assert!(Cli::try_parse_from(["tictactoe", "play", "--token-one", "12"]).is_err());
}

#[test]
fn test_selfplay_defaults() {
    let cli = Cli::try_parse_from(["tictactoe", "selfplay", "-g", "5"]).unwrap();
    match cli.command {
        Command::Selfplay {
            difficulty_one,
            difficulty_two,
            games,
            seed,
            ..
        } => {
            assert_eq!(difficulty_one, Difficulty::Hard);
            assert_eq!(difficulty_two, Difficulty::Hard);
            assert_eq!(games, 5);
            assert_eq!(seed, 0);
        }
        Command::Play(_) => panic!("expected selfplay"),
    }
}
