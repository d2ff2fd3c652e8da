//! Line-based game driver: renders the board, reads moves, re-prompts on
//! illegal input.

use anyhow::{Result, anyhow};
use std::io::{BufRead, Write};
use super::settings::GameSettings;
use tictactoe_engine::{Difficulty, Game, GameError, GameStatus, Player};
use tracing::{debug, info, instrument, warn};

/// Key that abandons the game at any prompt.
pub const QUIT_KEY: &str = "q";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game reached a win or a tie.
    Finished(GameStatus),
    /// A player quit or input ran out.
    Quit,
}

/// Drives one game over a line-oriented terminal.
pub struct Driver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// Creates a driver reading moves from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the driver, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Lets each human pick a token, re-prompting until it is valid.
    ///
    /// An empty line keeps the current token. Returns false if a player quit.
    #[instrument(skip_all)]
    pub fn choose_tokens(&mut self, players: &mut [Player; 2]) -> Result<bool> {
        for seat in 0..2 {
            if players[seat].is_computer() {
                continue;
            }
            loop {
                let opponent = players[1 - seat].token();
                let prompt = format!(
                    "{} token [{}]: ",
                    players[seat],
                    players[seat].token()
                );
                let Some(line) = self.prompt(&prompt)? else {
                    info!("Player quit the game");
                    return Ok(false);
                };
                if line.is_empty() {
                    if players[seat].token() == opponent {
                        writeln!(self.output, "{}", GameError::DuplicateToken(opponent))?;
                        continue;
                    }
                    break;
                }
                match players[seat].set_token(&line, Some(opponent)) {
                    Ok(_) => break,
                    Err(e) => writeln!(self.output, "{}", e)?,
                }
            }
        }
        Ok(true)
    }

    /// Lets the user set each computer's difficulty, re-prompting until it
    /// parses.
    ///
    /// An empty line keeps the current difficulty. Returns false if the
    /// user quit.
    #[instrument(skip_all)]
    pub fn choose_difficulties(&mut self, players: &mut [Player; 2]) -> Result<bool> {
        for player in players.iter_mut() {
            let Some(current) = player.difficulty() else {
                continue;
            };
            loop {
                let prompt = format!("{} difficulty (easy, medium, hard) [{}]: ", player, current);
                let Some(line) = self.prompt(&prompt)? else {
                    info!("Player quit the game");
                    return Ok(false);
                };
                if line.is_empty() {
                    break;
                }
                match line.parse::<Difficulty>() {
                    Ok(difficulty) => {
                        player.set_difficulty(difficulty);
                        break;
                    }
                    Err(_) => writeln!(self.output, "Unknown difficulty {:?}", line)?,
                }
            }
        }
        Ok(true)
    }

    /// Plays games seated from `settings` until the user declines a rematch
    /// or quits.
    ///
    /// The same players (tokens, difficulties, random state) return for every
    /// game. Returns how each game ended, in order.
    #[instrument(skip_all)]
    pub fn play_series(
        &mut self,
        settings: &GameSettings,
        players: [Player; 2],
    ) -> Result<Vec<SessionEnd>> {
        let mut ends = Vec::new();
        let mut players = players;
        loop {
            let mut game = settings.seat(players)?;
            let end = self.run(&mut game)?;
            ends.push(end);
            if end == SessionEnd::Quit {
                return Ok(ends);
            }
            if !self.ask_play_again()? {
                info!("Game over");
                return Ok(ends);
            }
            players = game.into_players();
        }
    }

    /// Asks whether to play another game. Only `y` or `yes` accepts.
    pub fn ask_play_again(&mut self) -> Result<bool> {
        let Some(line) = self.prompt("Play again? [y/N]: ")? else {
            return Ok(false);
        };
        Ok(line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes"))
    }

    /// Plays `game` to completion or until a player quits.
    #[instrument(skip_all)]
    pub fn run(&mut self, game: &mut Game) -> Result<SessionEnd> {
        info!("Starting a new game");
        loop {
            writeln!(self.output, "\n{}\n", game.board())?;

            let status = *game.status();
            if status.is_finished() {
                self.announce(game, status)?;
                return Ok(SessionEnd::Finished(status));
            }

            let player = game
                .current_player()
                .ok_or_else(|| anyhow!("No player to move in an unfinished game"))?;
            if player.is_computer() {
                let label = player.label().to_string();
                if let Some(space) = game.advance_computer()? {
                    writeln!(self.output, "{} placed a token on {}", label, space)?;
                }
                continue;
            }

            let prompt = format!(
                "{} ({}), choose a space 0-8 or {} to quit: ",
                player,
                player.token(),
                QUIT_KEY
            );
            let Some(line) = self.prompt(&prompt)? else {
                info!("Player quit the game");
                return Ok(SessionEnd::Quit);
            };

            match game.apply_key(&line) {
                Ok(_) => {}
                Err(
                    e @ (GameError::KeyNotOnBoard(_)
                    | GameError::SpotAlreadySelected(_)
                    | GameError::SpotTakenByOpponent(_)),
                ) => {
                    debug!(error = %e, "Rejected move");
                    writeln!(self.output, "{}", e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn announce(&mut self, game: &Game, status: GameStatus) -> Result<()> {
        match status {
            GameStatus::Won { token, pattern } => {
                let name = game
                    .winner()
                    .map(|p| p.label().to_string())
                    .unwrap_or_else(|| token.to_string());
                let line: Vec<String> = pattern.iter().map(|s| s.to_string()).collect();
                writeln!(self.output, "{} wins! ({})", name, line.join("-"))?;
            }
            GameStatus::Tie => writeln!(self.output, "Game ended in a tie")?,
            GameStatus::InProgress => {}
        }
        Ok(())
    }

    /// Writes `prompt` and reads one trimmed line.
    ///
    /// Returns `None` on end of input or the quit key.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            warn!("Input closed");
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case(QUIT_KEY) {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}
