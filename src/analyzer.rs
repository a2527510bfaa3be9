//! Per-player statistics over a collection of PGN games.
//!
//! A win scores 1 and a draw scores ½. Games the player did not take part in are skipped.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::pgn::PgnGame;

/// ECO key for games without an `ECO` tag
pub const UNKNOWN_ECO: &str = "?";

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameStats {
    /// Games the player took part in
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Games per ECO code, [`UNKNOWN_ECO`] for untagged ones
    pub eco_counts: BTreeMap<String, u32>,
    pub games_as_white: u32,
    pub games_as_black: u32,
}

impl GameStats {
    /// Wins plus half the draws
    #[must_use]
    pub fn score(&self) -> f64 {
        f64::from(self.wins) + f64::from(self.draws) / 2.0
    }

    /// Score as a percentage of games played, 0 with no games
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.score() * 100.0 / f64::from(self.games)
    }

    /// The complement of [`win_percentage`](Self::win_percentage); a draw counts half lost
    #[must_use]
    pub fn loss_percentage(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        100.0 - self.win_percentage()
    }

    /// Share of games per ECO code, in percent
    #[must_use]
    pub fn eco_percentages(&self) -> BTreeMap<String, f64> {
        self.eco_counts
            .iter()
            .map(|(eco, &count)| (eco.clone(), f64::from(count) * 100.0 / f64::from(self.games)))
            .collect()
    }

    /// The color played more often. Ties go to White; `None` with no games.
    #[must_use]
    pub fn most_played_color(&self) -> Option<Color> {
        match self.games {
            0 => None,
            _ if self.games_as_black > self.games_as_white => Some(Color::Black),
            _ => Some(Color::White),
        }
    }
}

/// Collect `user`'s results, openings and colors across `games`.
///
/// The player is matched against the `White` and `Black` tags exactly. Games with any result
/// other than `1-0`, `0-1` or `1/2-1/2` (unfinished `*` or a missing tag) still count towards
/// games, openings and colors, and score as a loss.
#[must_use]
pub fn game_stats(user: &str, games: &[PgnGame]) -> GameStats {
    let mut stats = GameStats::default();
    for game in games {
        let color = if game.white.as_deref() == Some(user) {
            Color::White
        } else if game.black.as_deref() == Some(user) {
            Color::Black
        } else {
            continue;
        };

        stats.games += 1;
        match color {
            Color::White => stats.games_as_white += 1,
            Color::Black => stats.games_as_black += 1,
        }
        match (game.result.as_deref(), color) {
            (Some("1/2-1/2"), _) => stats.draws += 1,
            (Some("1-0"), Color::White) | (Some("0-1"), Color::Black) => stats.wins += 1,
            _ => stats.losses += 1,
        }
        let eco = game.eco.clone().unwrap_or_else(|| UNKNOWN_ECO.to_string());
        *stats.eco_counts.entry(eco).or_insert(0) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(white: &str, black: &str, result: &str, eco: Option<&str>) -> PgnGame {
        PgnGame {
            white: Some(white.to_string()),
            black: Some(black.to_string()),
            result: Some(result.to_string()),
            eco: eco.map(str::to_string),
            ..PgnGame::default()
        }
    }

    #[test]
    fn test_draw_scores_half() {
        let games = [
            game("alice", "bob", "1-0", Some("C20")),
            game("bob", "alice", "1/2-1/2", Some("B01")),
            game("bob", "alice", "1-0", Some("C20")),
            game("alice", "carol", "0-1", Some("A00")),
        ];
        let stats = game_stats("alice", &games);
        assert_eq!(stats.games, 4);
        assert_eq!((stats.wins, stats.draws, stats.losses), (1, 1, 2));
        assert!((stats.score() - 1.5).abs() < f64::EPSILON);
        assert!((stats.win_percentage() - 37.5).abs() < 1e-9);
        assert!((stats.loss_percentage() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_eco_tally() {
        let games = [
            game("alice", "bob", "1-0", Some("C20")),
            game("alice", "bob", "0-1", Some("C20")),
            game("bob", "alice", "0-1", Some("B01")),
            game("bob", "alice", "*", None),
        ];
        let stats = game_stats("alice", &games);
        assert_eq!(stats.eco_counts.get("C20"), Some(&2));
        assert_eq!(stats.eco_counts.get("B01"), Some(&1));
        assert_eq!(stats.eco_counts.get(UNKNOWN_ECO), Some(&1));
        let shares = stats.eco_percentages();
        assert!((shares["C20"] - 50.0).abs() < 1e-9);
        assert!((shares["B01"] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_most_played_color() {
        let games = [
            game("alice", "bob", "1-0", None),
            game("bob", "alice", "1-0", None),
            game("carol", "alice", "1-0", None),
        ];
        assert_eq!(game_stats("alice", &games).most_played_color(), Some(Color::Black));
        assert_eq!(game_stats("alice", &games[..2]).most_played_color(), Some(Color::White));
        assert_eq!(game_stats("carol", &games).games_as_white, 1);
    }

    #[test]
    fn test_other_players_games_skipped() {
        let games = [game("bob", "carol", "1-0", Some("C20"))];
        let stats = game_stats("alice", &games);
        assert_eq!(stats, GameStats::default());
        assert_eq!(stats.win_percentage(), 0.0);
        assert_eq!(stats.most_played_color(), None);
        assert!(stats.eco_percentages().is_empty());
    }

    #[test]
    fn test_stats_from_parsed_pgn() {
        let text = "[White \"alice\"]\n[Black \"bob\"]\n[Result \"1/2-1/2\"]\n[ECO \"C42\"]\n\n\
                    1. e4 e5 2. Nf3 Nf6 1/2-1/2\n\n\
                    [Event \"Rematch\"]\n[White \"bob\"]\n[Black \"alice\"]\n[Result \"0-1\"]\n\
                    [ECO \"C42\"]\n\n1. e4 e5 2. Nf3 Nf6 0-1\n";
        let games = crate::pgn::parse_games(text);
        let stats = game_stats("alice", &games);
        assert_eq!(stats.games, 2);
        assert!((stats.win_percentage() - 75.0).abs() < 1e-9);
        assert_eq!(stats.eco_counts.get("C42"), Some(&2));
    }
}
