use chess_rules::pgn::{parse_games, PgnError};
use chess_rules::{GameStatus, SanError};

const BLITZ_GAMES: &str = r#"[Event "Rated Blitz game"]
	[Site "https://lichess.org/R2Mc2Oi3"]
	[Date "2024.02.09"]
	[White "EddyRob"]
	[Black "Steevie"]
	[Result "1-0"]
	[WhiteElo "2048"]
	[BlackElo "2030"]
	[Variant "Standard"]
	[TimeControl "180+2"]
	[ECO "B28"]
	[Termination "Normal"]

	1. e4 c5 2. Nf3 a6 3. d4 cxd4 4. Nxd4 e5 5. Nb3 Nf6 6. Nc3 Bb4 7. f3 d5 8. exd5 Nxd5 9. Bd2 Nxc3 10. Bxc3 Bxc3+ 11. bxc3 Qxd1+ 12. Rxd1 Nc6 13. Nc5 b6 14. Ne4 Be6 15. Nd6+ Ke7 16. Bc4 Rhd8 17. Bxe6 Kxe6 18. Nc4 Rxd1+ 19. Kxd1 b5 20. Ne3 f5 21. Ke2 Rd8 22. Rb1 f4 23. Nd1 Rd5 24. Nf2 Na5 25. a4 bxa4 26. Rb6+ Rd6 27. Rb4 Nc6 28. Rxa4 a5 29. Ne4 Rd5 30. c4 Rd7 31. Nc5+ Kd6 32. Nxd7 Kxd7 33. Kd3 Kd6 34. Ke4 Kc5 35. Kf5 Kd4 36. Ke6 Ke3 37. Kd6 Nd4 38. Kxe5 Nc6+ 39. Kd6
	Nd4 40. c5 Kf2 41. Rxd4 1-0


	[Event "Rated Blitz game"]
	[Site "https://lichess.org/4wybg79d"]
	[Date "2024.02.09"]
	[White "kakaobohne"]
	[Black "EddyRob"]
	[Result "0-1"]
	[Variant "Standard"]
	[TimeControl "180+2"]
	[ECO "E76"]

	1. d4 Nf6 2. c4 c5 3. d5 g6 4. Nc3 d6 5. e4 Bg7 6. f4 O-O 7. Nf3 a6 8. e5 Nfd7 9. e6 Nf6 10. exf7+ Rxf7 11. Ng5 Bg4 12. Nxf7 Kxf7 13. Qb3 Qd7 14. h3 Bf5 15. Be2 e6 16. g4 Be4 17. Nxe4 Nxe4 18. f5 exf5 19. gxf5 gxf5 20. Bh5+ Kg8 21. O-O Qe7 22. Bf3 Bd4+ 23. Kh2 Qe5+ 24. Kh1 Nf2+ 25. Kg2 Qg7+ 26. Kh2 Be5+ 0-1
"#;

#[test]
fn headers_are_typed() {
    let games = parse_games(BLITZ_GAMES);
    assert_eq!(games.len(), 2);

    let first = &games[0];
    assert_eq!(first.event.as_deref(), Some("Rated Blitz game"));
    assert_eq!(first.site.as_deref(), Some("https://lichess.org/R2Mc2Oi3"));
    assert_eq!(first.date.as_deref(), Some("2024.02.09"));
    assert_eq!(first.white.as_deref(), Some("EddyRob"));
    assert_eq!(first.black.as_deref(), Some("Steevie"));
    assert_eq!(first.result.as_deref(), Some("1-0"));
    assert_eq!(first.variant.as_deref(), Some("Standard"));
    assert_eq!(first.time_control.as_deref(), Some("180+2"));
    assert_eq!(first.eco.as_deref(), Some("B28"));
    assert_eq!(first.tag("Termination"), Some("Normal"));
    assert!(first.movetext.ends_with("Kf2 41. Rxd4 1-0"));

    assert_eq!(games[1].white.as_deref(), Some("kakaobohne"));
    assert_eq!(games[1].eco.as_deref(), Some("E76"));
}

#[test]
fn lichess_games_replay_move_for_move() {
    for (game, plies) in parse_games(BLITZ_GAMES).iter().zip([81, 52]) {
        let tokens = game.san_moves();
        assert_eq!(tokens.len(), plies);

        let replayed = game.replay().expect("recorded game should replay");
        assert_eq!(replayed.moves().len(), plies);
        // both games ended by resignation
        assert_eq!(replayed.status(), GameStatus::InProgress);

        // regenerated SAN matches the recorded tokens exactly
        for ((board, mv), token) in replayed.history().iter().zip(replayed.moves()).zip(&tokens) {
            assert_eq!(&board.move_to_san(*mv), token);
        }
    }
}

#[test]
fn corrupted_movetext_reports_the_ply() {
    let text = BLITZ_GAMES.replacen("16. Bc4 Rhd8", "16. Bc4 Rd8", 1);
    let games = parse_games(&text);
    match games[0].replay() {
        Err(PgnError::IllegalMove { ply, token, error }) => {
            assert_eq!(ply, 32);
            assert_eq!(token, "Rd8");
            assert!(matches!(error, SanError::AmbiguousMove { .. }));
        }
        other => panic!("expected an ambiguous move, got {other:?}"),
    }
}
