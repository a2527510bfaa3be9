//! PGN import (and a small exporter) for replaying recorded games through the rules core.
//!
//! Parsing is deliberately forgiving about layout: tags may be indented, movetext may wrap
//! anywhere, and several games may be concatenated. A new game starts at an `[Event` tag that
//! follows movetext.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::board::{Board, Color, FenError, SanError, START_FEN};
use crate::game::{Game, GameOptions};

/// One game as read from PGN text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgnGame {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub variant: Option<String>,
    pub time_control: Option<String>,
    pub eco: Option<String>,
    /// Every other tag, `FEN` and `SetUp` included
    pub other_tags: BTreeMap<String, String>,
    /// Raw movetext, lines joined with single spaces
    pub movetext: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// The `FEN` tag does not describe a valid position
    InvalidFen { fen: String, error: FenError },
    /// A move token could not be played; `ply` counts from 1
    IllegalMove {
        ply: usize,
        token: String,
        error: SanError,
    },
}

impl fmt::Display for PgnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgnError::InvalidFen { fen, error } => write!(f, "Invalid FEN tag '{fen}': {error}"),
            PgnError::IllegalMove { ply, token, error } => {
                write!(f, "Cannot play '{token}' at ply {ply}: {error}")
            }
        }
    }
}

impl std::error::Error for PgnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PgnError::InvalidFen { error, .. } => Some(error),
            PgnError::IllegalMove { error, .. } => Some(error),
        }
    }
}

/// Split `text` into games and parse each one's tags and movetext
#[must_use]
pub fn parse_games(text: &str) -> Vec<PgnGame> {
    let mut games = Vec::new();
    let mut current = PgnGame::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            if line.starts_with("[Event") && !current.movetext.is_empty() {
                games.push(std::mem::take(&mut current));
            }
            if let Some((name, value)) = parse_tag(line) {
                current.set_tag(name, value);
            }
            continue;
        }

        // `;` comments run to the end of the line
        let line = line.split(';').next().unwrap_or_default().trim();
        if !line.is_empty() {
            if !current.movetext.is_empty() {
                current.movetext.push(' ');
            }
            current.movetext.push_str(line);
        }
    }

    if current != PgnGame::default() {
        games.push(current);
    }
    games
}

/// `[Name "Value"]`, with `\"` unescaped
fn parse_tag(line: &str) -> Option<(&str, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let (name, raw) = inner.split_once(char::is_whitespace)?;
    let raw = raw.trim();
    let value = raw.strip_prefix('"')?.strip_suffix('"')?;
    Some((name, value.replace("\\\"", "\"")))
}

impl PgnGame {
    fn set_tag(&mut self, name: &str, value: String) {
        let slot = match name {
            "Event" => &mut self.event,
            "Site" => &mut self.site,
            "Date" => &mut self.date,
            "White" => &mut self.white,
            "Black" => &mut self.black,
            "Result" => &mut self.result,
            "Variant" => &mut self.variant,
            "TimeControl" => &mut self.time_control,
            "ECO" => &mut self.eco,
            _ => {
                self.other_tags.insert(name.to_string(), value);
                return;
            }
        };
        *slot = Some(value);
    }

    /// Value of any tag by name, typed or not
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        let typed = match name {
            "Event" => &self.event,
            "Site" => &self.site,
            "Date" => &self.date,
            "White" => &self.white,
            "Black" => &self.black,
            "Result" => &self.result,
            "Variant" => &self.variant,
            "TimeControl" => &self.time_control,
            "ECO" => &self.eco,
            _ => return self.other_tags.get(name).map(String::as_str),
        };
        typed.as_deref()
    }

    /// The SAN tokens of the main line, in order.
    ///
    /// Move numbers, comments, NAGs, variations and the result token are dropped.
    #[must_use]
    pub fn san_moves(&self) -> Vec<String> {
        strip_comments_and_variations(&self.movetext)
            .split_whitespace()
            .filter_map(|token| {
                let token = strip_move_number(token);
                if token.is_empty() || token.starts_with('$') || is_result_token(token) {
                    None
                } else {
                    Some(token.to_string())
                }
            })
            .collect()
    }

    /// Play the main line from the `FEN` tag (or the standard start) through a [`Game`].
    ///
    /// Recorded games may go on past a repetition or the fifty-move mark, since in play those
    /// draws are claimed rather than automatic. Draw adjudication is therefore off while the
    /// moves are replayed, and the returned game carries the default options, with its final
    /// position classified under them.
    pub fn replay(&self) -> Result<Game, PgnError> {
        let recorded = GameOptions {
            fifty_move_plies: 0,
            repetition_limit: 0,
            insufficient_material: false,
        };
        let start = match self.other_tags.get("FEN") {
            Some(fen) => Board::try_from_fen(fen).map_err(|error| PgnError::InvalidFen {
                fen: fen.clone(),
                error,
            })?,
            None => Board::new(),
        };
        let mut game = Game::from_board_with_options(start, recorded);

        for (i, token) in self.san_moves().into_iter().enumerate() {
            match game.play_san(&token) {
                Ok(mv) => debug!("ply {}: {token} -> {mv}", i + 1),
                Err(error) => {
                    return Err(PgnError::IllegalMove {
                        ply: i + 1,
                        token,
                        error,
                    })
                }
            }
        }
        game.set_options(GameOptions::default());
        Ok(game)
    }
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth += 1,
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth += 1,
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
        // keeps `e4{comment}e5` as two tokens
        if matches!(ch, '{' | '}' | '(' | ')') {
            out.push(' ');
        }
    }
    out
}

/// `12.`, `12...` and `12.e4` all lose their number prefix
fn strip_move_number(token: &str) -> &str {
    let digits = token.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return token;
    }
    let rest = &token[digits..];
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Numbered SAN movetext of the moves played so far (`1. e4 e5 2. Nf3`)
#[must_use]
pub fn format_movetext(game: &Game) -> String {
    let mut parts = Vec::with_capacity(game.moves().len());
    for (board, mv) in game.history().iter().zip(game.moves()) {
        let san = board.move_to_san(*mv);
        if board.side_to_move() == Color::White {
            parts.push(format!("{}. {san}", board.fullmove_number()));
        } else if parts.is_empty() {
            parts.push(format!("{}... {san}", board.fullmove_number()));
        } else {
            parts.push(san);
        }
    }
    parts.join(" ")
}

/// Render a game as PGN with the given tags (plus `Result`, and `SetUp`/`FEN` when the game
/// did not start from the standard position).
#[must_use]
pub fn write_game(game: &Game, tags: &BTreeMap<String, String>) -> String {
    let mut tags = tags.clone();
    let result = game.status().result_token();
    tags.insert("Result".to_string(), result.to_string());
    let start = game.history().first().copied().unwrap_or_default();
    let start_fen = start.to_fen();
    if start_fen != START_FEN {
        tags.insert("SetUp".to_string(), "1".to_string());
        tags.insert("FEN".to_string(), start_fen);
    }

    let mut out = String::new();
    for (name, value) in &tags {
        out.push_str(&format!("[{name} \"{}\"]\n", value.replace('"', "\\\"")));
    }
    out.push('\n');

    out.push_str(&format_movetext(game));
    if !game.moves().is_empty() {
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');
    out
}
