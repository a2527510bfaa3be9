//! Move application: the new state carries every side effect, the old one none.

use crate::board::{Board, CastlingRights, Color, Move, Piece, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(board: Board, uci: &str) -> Board {
    let mv = board.parse_move(uci).unwrap();
    board.apply_move(mv)
}

#[test]
fn test_en_passant_removes_pawn_from_its_origin() {
    // e2e4 a7a6 e4e5 d7d5 e5xd6
    let mut board = Board::new();
    for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        board = play(board, uci);
    }
    assert_eq!(board.en_passant_target(), Some(sq("d6")));

    let ep = board.parse_move("e5d6").unwrap();
    assert!(ep.is_en_passant());
    let after = board.apply_move(ep);

    assert_eq!(after.piece_at(sq("d6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(after.piece_at(sq("d5")), None, "captured pawn leaves d5");
    assert_eq!(after.piece_at(sq("e5")), None);
    assert_eq!(after.pieces(Color::Black, Piece::Pawn).popcount(), 7);
    assert_eq!(after.halfmove_clock(), 0);

    // the source position still has the black pawn
    assert_eq!(board.piece_at(sq("d5")), Some((Color::Black, Piece::Pawn)));
}

#[test]
fn test_black_en_passant() {
    let board = Board::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1");
    let board = play(board, "e2e4");
    assert_eq!(board.en_passant_target(), Some(sq("e3")));
    let after = play(board, "d4e3");
    assert_eq!(after.piece_at(sq("e4")), None);
    assert_eq!(after.piece_at(sq("e3")), Some((Color::Black, Piece::Pawn)));
}

#[test]
fn test_en_passant_target_expires_after_one_ply() {
    let mut board = Board::new();
    board = play(board, "e2e4");
    assert!(board.en_passant_target().is_some());
    board = play(board, "g8f6");
    assert_eq!(board.en_passant_target(), None);
}

#[test]
fn test_counters() {
    let mut board = Board::new();
    board = play(board, "g1f3");
    assert_eq!(board.halfmove_clock(), 1);
    assert_eq!(board.fullmove_number(), 1);
    board = play(board, "g8f6");
    assert_eq!(board.halfmove_clock(), 2);
    assert_eq!(board.fullmove_number(), 2);
    board = play(board, "e2e4");
    assert_eq!(board.halfmove_clock(), 0);
    board = play(board, "f6e4");
    assert_eq!(board.halfmove_clock(), 0, "captures reset the clock");
    assert_eq!(board.fullmove_number(), 3);
}

#[test]
fn test_king_move_drops_both_rights() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let after = play(board, "e1f1");
    assert!(!after.castling_rights().has(Color::White, true));
    assert!(!after.castling_rights().has(Color::White, false));
    assert!(after.castling_rights().has(Color::Black, true));
    // moving back does not restore them
    let after = play(play(after, "a8b8"), "f1e1");
    assert!(!after.castling_rights().has(Color::White, true));
    assert!(!after.castling_rights().has(Color::Black, false));
}

#[test]
fn test_rook_move_drops_one_right() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let after = play(board, "h1h2");
    let mut expected = CastlingRights::all();
    expected.remove(Color::White, true);
    assert_eq!(after.castling_rights(), expected);
}

#[test]
fn test_apply_never_mutates_source() {
    let board = Board::new();
    let snapshot = board;
    for &mv in board.legal_moves().iter() {
        let _ = board.apply_move(mv);
    }
    assert_eq!(board, snapshot);
}

#[test]
fn test_promotion_capture() {
    let board = Board::from_fen("1r5k/P7/8/8/8/8/8/4K3 w - - 0 1");
    let mv = board.parse_move("a7b8q").unwrap();
    assert!(mv.is_capture() && mv.is_promotion());
    let after = board.apply_move(mv);
    assert_eq!(after.piece_at(sq("b8")), Some((Color::White, Piece::Queen)));
    assert!(after.pieces(Color::Black, Piece::Rook).is_empty());
}

#[test]
fn test_hash_matches_recomputation_after_special_moves() {
    let board = Board::from_fen("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1");
    for uci in ["e1g1", "e1c1", "e5d6", "b7a8q", "b7b8n"] {
        let mv = board.parse_move(uci).unwrap();
        let after = board.apply_move(mv);
        assert_eq!(after.position_key(), after.compute_hash(), "{uci}");
    }
}

#[test]
fn test_move_constructors_round_trip_through_display() {
    let mv = Move::promotion(sq("e7"), sq("e8"), Piece::Queen, false);
    assert_eq!(mv.to_string(), "e7e8q");
    let mv = Move::castle(Square::E1, Square::G1, true);
    assert_eq!(mv.to_string(), "e1g1");
}
