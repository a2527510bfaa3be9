use serde::Deserialize;

use chess_rules::{status, Board, GameStatus};

#[derive(Deserialize)]
struct PositionSet {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct Position {
    name: String,
    fen: String,
    legal_moves: usize,
    in_check: bool,
    status: String,
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "in_progress",
        GameStatus::Checkmate { .. } => "checkmate",
        GameStatus::Stalemate => "stalemate",
        GameStatus::Draw(_) => "draw",
    }
}

#[test]
fn position_suite() {
    let data = include_str!("data/positions.json");
    let set: PositionSet = serde_json::from_str(data).expect("invalid positions.json");
    assert!(!set.positions.is_empty());

    for position in &set.positions {
        let board = Board::try_from_fen(&position.fen)
            .unwrap_or_else(|e| panic!("{}: bad FEN: {e}", position.name));

        assert_eq!(
            board.legal_moves().len(),
            position.legal_moves,
            "legal move count for {}",
            position.name
        );
        assert_eq!(board.is_in_check(), position.in_check, "check for {}", position.name);
        assert_eq!(
            status_label(status(&board, &[])),
            position.status,
            "status for {}",
            position.name
        );
        assert_eq!(board.to_fen(), position.fen, "FEN round trip for {}", position.name);
    }
}
