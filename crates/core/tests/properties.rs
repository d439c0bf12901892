use chess_tactics_core::board::{
    cast_ray, coords_to_square, ray_directions, square_to_coords, BoardSnapshot, FULL_RANGE,
};
use chess_tactics_core::eval::evaluate_board;
use chess_tactics_core::{
    evaluate, resolve_move, EvaluationLabel, Game, MoveResolution, RulesEngine,
};
use shakmaty::{Piece, Role, Square};

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/pPp2ppp/8/3pP3/8/8/P4PPP/R3K2R w KQkq d6 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    "8/2k5/8/3p4/8/8/5K2/8 b - - 0 1",
];

fn game(fen: &str) -> Game {
    Game::from_notation(fen).unwrap()
}

#[test]
fn coordinates_round_trip() {
    for row in 0..8 {
        for col in 0..8 {
            let square = coords_to_square(row, col).unwrap();
            let back = square_to_coords(square);
            assert_eq!((back.row, back.col), (row, col));
        }
    }
    for square in Square::ALL {
        let c = square_to_coords(square);
        assert_eq!(coords_to_square(c.row, c.col), Some(square));
    }
    assert_eq!(coords_to_square(-1, 0), None);
    assert_eq!(coords_to_square(0, 8), None);
}

#[test]
fn rays_stay_on_board_and_stop_at_first_piece() {
    for fen in POSITIONS {
        let board = game(fen).board_snapshot();
        for origin in Square::ALL {
            for &direction in ray_directions(Role::Queen) {
                let ray = cast_ray(&board, origin, direction, FULL_RANGE);
                assert!(ray.len() <= 7);
                if let Some((_, before_last)) = ray.split_last() {
                    assert!(before_last.iter().all(|&sq| board.piece_at(sq).is_none()));
                }
            }
        }
    }
}

#[test]
fn every_legal_san_resolves_to_itself() {
    for fen in POSITIONS {
        let start = game(fen);
        for expected in start.legal_moves() {
            let mut copy = start.clone();
            match resolve_move(&expected.san, &mut copy).unwrap() {
                MoveResolution::Success { mv, .. } => assert_eq!(mv, expected, "{} in {}", expected.san, fen),
                failure => panic!("{} did not resolve in {}: {:?}", expected.san, fen, failure),
            }
        }
    }
}

#[test]
fn unresolved_piece_input_still_suggests() {
    let after_e4_e5 = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    for input in ["Nc4", "Qa4", "Bb4", "Ke3"] {
        let mut g = game(after_e4_e5);
        match resolve_move(input, &mut g).unwrap() {
            MoveResolution::Failure { suggestion, .. } => {
                assert!(!suggestion.valid_moves.is_empty(), "{}", input);
            }
            success => panic!("{} should not resolve: {:?}", input, success),
        }
        assert_eq!(g.notation(), after_e4_e5);
    }
}

fn mirrored(board: &BoardSnapshot) -> BoardSnapshot {
    let mut flipped = BoardSnapshot::empty();
    for (square, piece) in board.pieces() {
        flipped.set(
            square.flip_vertical(),
            Some(Piece {
                color: piece.color.other(),
                role: piece.role,
            }),
        );
    }
    flipped
}

#[test]
fn evaluation_is_white_positive() {
    let start = evaluate(&Game::new());
    assert!(start.score.abs() < 0.1);
    assert_eq!(start.label, EvaluationLabel::Equal);

    let white_up_rook = evaluate(&game("1nbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1"));
    assert!(white_up_rook.score >= 4.0);

    for fen in POSITIONS {
        let board = game(fen).board_snapshot();
        let score = evaluate_board(&board).score;
        let mirror = evaluate_board(&mirrored(&board)).score;
        assert!((score + mirror).abs() < 1e-9, "{}: {} vs {}", fen, score, mirror);
    }
}
