use chess_tactics_core::{
    classify_tactics, evaluate, resolve_move, Game, GameAnalyzer, MoveQuality, MoveResolution,
    RulesEngine,
};

fn play(fen: &str, input: &str) -> chess_tactics_core::TacticsRecord {
    let before = Game::from_notation(fen).unwrap();
    let mut after = before.clone();
    match resolve_move(input, &mut after).unwrap() {
        MoveResolution::Success { mv, .. } => classify_tactics(&mv, &before, &after),
        failure => panic!("{} did not resolve: {:?}", input, failure),
    }
}

#[test]
fn queen_forks_two_undefended_rooks() {
    let record = play("3r4/6k1/8/r7/8/8/8/6KQ w - - 0 1", "Qd5");
    assert!(record.is_fork);
    assert!(record.is_double_attack);
    assert!(!record.is_check);

    let single_target = play("3r4/6k1/8/r7/8/8/8/6KQ w - - 0 1", "Qb7+");
    assert!(!single_target.is_fork);
}

#[test]
fn bishop_pins_knight_to_king() {
    let record = play("8/8/5k2/8/3n4/8/8/2B4K w - - 0 1", "Bb2");
    assert!(record.is_pin);
    assert!(!record.is_skewer);

    let king_elsewhere = play("8/5k2/8/8/3n4/8/8/2B4K w - - 0 1", "Bb2");
    assert!(!king_elsewhere.is_pin);
}

#[test]
fn early_queen_sortie() {
    let mut game = Game::new();
    for input in ["e4", "e5"] {
        assert!(resolve_move(input, &mut game).unwrap().is_success());
    }
    let before = game.clone();

    let mv = match resolve_move("Qh5", &mut game).unwrap() {
        MoveResolution::Success { mv, .. } => mv,
        failure => panic!("Qh5 did not resolve: {:?}", failure),
    };
    assert_eq!(mv.san, "Qh5");

    let record = classify_tactics(&mv, &before, &game);
    assert!(!record.is_check);
    assert!(!record.is_fork);
    assert!(record.is_double_attack);
    assert!(record.is_pin);
    assert!(!record.is_mating_threat);

    assert!(evaluate(&game).score.abs() < 2.0);
}

#[test]
fn scholars_mate_replay() {
    let moves = ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"];
    let replay = GameAnalyzer::default().replay(&moves).unwrap();

    assert_eq!(replay.plies_analysed(), 7);
    let last = replay.turns.last().unwrap();
    assert!(last.tactics.is_checkmate);
    assert!(last.tactics.is_capture);
    assert_eq!(last.quality, MoveQuality::Checkmate);
    assert!(replay.status.is_over());
    assert_eq!(replay.turns[0].fen_after, replay.turns[1].fen_before);
}

#[test]
fn loose_input_game() {
    let moves = ["e2e4", "E5", "g1f3", "nc6", "b5?", "a6", "bxa6"];
    let replay = GameAnalyzer::default().replay(&moves).unwrap();
    assert_eq!(replay.stopped.as_ref().map(|s| s.ply), Some(5));
    assert_eq!(replay.plies_analysed(), 4);
}
