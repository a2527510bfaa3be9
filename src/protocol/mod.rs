//! Line-oriented text protocol for driving a [`Game`] by hand or from a script.
//!
//! Every command produces zero or more output lines. Failures are reported as a single
//! `error: ...` line and never end the session; only `quit` or end of input does.
//!
//! ```text
//! > position startpos moves e2e4 e7e5
//! ok
//! > move Nf3
//! ok g1f3
//! > status
//! in progress
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::board::{Board, FenError, MoveParseError};
use crate::game::{parse_setoption, Game, OptionError};
use crate::pgn::format_movetext;

pub mod command;

pub use command::{parse_command, Command};

/// Error type for protocol command handling
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidFen(FenError),
    InvalidMove { move_str: String, error: MoveParseError },
    InvalidOption(OptionError),
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            ProtocolError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            ProtocolError::InvalidOption(e) => write!(f, "{e}"),
            ProtocolError::MissingParts => write!(f, "Missing required parts in command"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<FenError> for ProtocolError {
    fn from(e: FenError) -> Self {
        ProtocolError::InvalidFen(e)
    }
}

impl From<OptionError> for ProtocolError {
    fn from(e: OptionError) -> Self {
        ProtocolError::InvalidOption(e)
    }
}

/// Build a game from `position startpos|fen <fen> [moves ...]`, keeping `template`'s options.
pub fn try_parse_position_command(template: &Game, parts: &[&str]) -> Result<Game, ProtocolError> {
    let moves_at = parts.iter().position(|p| *p == "moves").unwrap_or(parts.len());
    let board = match parts.get(1) {
        Some(&"startpos") if moves_at == 2 => Board::new(),
        Some(&"fen") if moves_at > 2 => Board::try_from_fen(&parts[2..moves_at].join(" "))?,
        _ => return Err(ProtocolError::MissingParts),
    };

    let mut game = Game::from_board_with_options(board, *template.options());
    for move_str in parts.iter().skip(moves_at + 1) {
        game.play_uci(move_str)
            .map_err(|error| ProtocolError::InvalidMove {
                move_str: (*move_str).to_string(),
                error,
            })?;
    }
    Ok(game)
}

/// Protocol state: the game being driven
#[derive(Debug, Default)]
pub struct Session {
    game: Game,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Session { game: Game::new() }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle one command, returning the lines to print
    pub fn handle_command(&mut self, cmd: &Command) -> Vec<String> {
        match self.try_handle(cmd) {
            Ok(lines) => lines,
            Err(e) => {
                debug!("command failed: {e}");
                vec![format!("error: {e}")]
            }
        }
    }

    fn try_handle(&mut self, cmd: &Command) -> Result<Vec<String>, ProtocolError> {
        let lines = match cmd {
            Command::New => {
                self.game = Game::with_options(*self.game.options());
                vec!["ok".to_string()]
            }
            Command::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                self.game = try_parse_position_command(&self.game, &parts)?;
                vec!["ok".to_string()]
            }
            Command::Move(move_str) => self.play(move_str)?,
            Command::Legal => {
                let moves: Vec<String> =
                    self.game.legal_moves().iter().map(ToString::to_string).collect();
                vec![moves.join(" ")]
            }
            Command::Status => vec![self.game.status().to_string()],
            Command::Undo => match self.game.undo() {
                Some(mv) => vec![format!("ok {mv}")],
                None => vec!["error: nothing to undo".to_string()],
            },
            Command::Fen => vec![self.game.current_state().to_fen()],
            Command::Board => self
                .game
                .current_state()
                .to_string()
                .lines()
                .map(str::to_string)
                .collect(),
            Command::History => vec![format_movetext(&self.game)],
            Command::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let (name, value) = parse_setoption(&parts).ok_or(ProtocolError::MissingParts)?;
                let mut options = *self.game.options();
                options.apply_setoption(&name, value.as_deref())?;
                self.game.set_options(options);
                vec!["ok".to_string()]
            }
            Command::Options => self.game.options().describe(),
            Command::Quit => Vec::new(),
            Command::Malformed(line) => {
                warn!("malformed command: {line}");
                vec![format!("error: malformed command '{line}'")]
            }
            Command::Unknown(line) => {
                warn!("unknown command: {line}");
                vec![format!("error: unknown command '{line}'")]
            }
        };
        Ok(lines)
    }

    /// Accept long algebraic notation first, then SAN
    fn play(&mut self, move_str: &str) -> Result<Vec<String>, ProtocolError> {
        let mv = match self.game.play_uci(move_str) {
            Ok(mv) => mv,
            Err(uci_error) => self.game.play_san(move_str).map_err(|_| {
                ProtocolError::InvalidMove {
                    move_str: move_str.to_string(),
                    error: uci_error,
                }
            })?,
        };

        let mut lines = vec![format!("ok {mv}")];
        let status = self.game.status();
        if status.is_terminal() {
            lines.push(format!("result {} {{{status}}}", status.result_token()));
        }
        Ok(lines)
    }
}

/// Run commands from `reader` until `quit` or end of input, writing replies to `writer`
pub fn run_session<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<()> {
    let mut session = Session::new();

    for bytes in reader.split(b'\n') {
        let bytes = bytes?;
        let Ok(line) = String::from_utf8(bytes) else {
            warn!("input line is not valid UTF-8");
            writeln!(writer, "error: input line is not valid UTF-8")?;
            writer.flush()?;
            continue;
        };
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        if cmd == Command::Quit {
            break;
        }
        for out in session.handle_command(&cmd) {
            writeln!(writer, "{out}")?;
        }
        writer.flush()?;
    }
    Ok(())
}
