//! Board-only evaluation terms, each signed so that white is positive

use serde::Serialize;
use shakmaty::{Color, Role, Square};

use super::tables::pst_bonus;
use crate::board::{attackers_of, square_to_coords, BoardSnapshot};
use crate::values::material_value;

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

const EXTENDED_CENTER: [Square; 12] = [
    Square::C3,
    Square::D3,
    Square::E3,
    Square::F3,
    Square::C4,
    Square::F4,
    Square::C5,
    Square::F5,
    Square::C6,
    Square::D6,
    Square::E6,
    Square::F6,
];

fn sign(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

/// Material per side in pawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterialBalance {
    pub white: i32,
    pub black: i32,
    /// `white - black`
    pub advantage: i32,
}

pub fn material(board: &BoardSnapshot) -> MaterialBalance {
    let (white, black) = board
        .pieces()
        .fold((0, 0), |(w, b), (_, piece)| match piece.color {
            Color::White => (w + material_value(piece.role), b),
            Color::Black => (w, b + material_value(piece.role)),
        });
    MaterialBalance {
        white,
        black,
        advantage: white - black,
    }
}

pub fn piece_square(board: &BoardSnapshot) -> f64 {
    board
        .pieces()
        .map(|(sq, piece)| pst_bonus(piece, sq) as f64 * 0.01 * sign(piece.color))
        .sum()
}

pub fn center_control(board: &BoardSnapshot) -> f64 {
    let mut score = 0.0;

    for sq in CENTER {
        if let Some(piece) = board.piece_at(sq) {
            score += 0.3 * sign(piece.color);
        }
        let white = attackers_of(board, sq, Color::White).len() as f64;
        let black = attackers_of(board, sq, Color::Black).len() as f64;
        score += (white - black) * 0.1;
    }

    for sq in EXTENDED_CENTER {
        if let Some(piece) = board.piece_at(sq) {
            score += 0.1 * sign(piece.color);
        }
    }

    score
}

/// Own pawns on the three squares directly in front of the king.
pub fn pawn_shield(board: &BoardSnapshot, king: Square, color: Color) -> usize {
    let c = square_to_coords(king);
    let forward = match color {
        Color::White => -1,
        Color::Black => 1,
    };
    (-1..=1)
        .filter(|&d_col| {
            matches!(
                board.piece_at_coords(c.row + forward, c.col + d_col),
                Some(p) if p.role == Role::Pawn && p.color == color
            )
        })
        .count()
}

pub fn king_safety(board: &BoardSnapshot) -> f64 {
    [Color::White, Color::Black]
        .into_iter()
        .filter_map(|color| board.king_square(color).map(|king| (color, king)))
        .map(|(color, king)| {
            let attackers = attackers_of(board, king, color.other()).len() as f64;
            let shield = pawn_shield(board, king, color) as f64;
            (shield * 0.3 - attackers * 0.5) * sign(color)
        })
        .sum()
}

/// Doubled and isolated pawn penalties.
pub fn pawn_structure(board: &BoardSnapshot) -> f64 {
    [Color::White, Color::Black]
        .into_iter()
        .map(|color| {
            let counts = pawns_per_file(board, color);
            let mut penalty = 0.0;
            for (file, &count) in counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                penalty += 0.5 * (count - 1) as f64;

                let left = if file > 0 { counts[file - 1] } else { 0 };
                let right = if file < 7 { counts[file + 1] } else { 0 };
                if left == 0 && right == 0 {
                    penalty += 0.3 * count as f64;
                }
            }
            -penalty * sign(color)
        })
        .sum()
}

fn pawns_per_file(board: &BoardSnapshot, color: Color) -> [u32; 8] {
    let mut counts = [0u32; 8];
    for (sq, piece) in board.pieces_of(color) {
        if piece.role == Role::Pawn {
            counts[u32::from(sq.file()) as usize] += 1;
        }
    }
    counts
}

/// Same-colour defenders of every piece.
pub fn coordination(board: &BoardSnapshot) -> f64 {
    board
        .pieces()
        .map(|(sq, piece)| attackers_of(board, sq, piece.color).len() as f64 * 0.05 * sign(piece.color))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Game, RulesEngine};

    fn board(fen: &str) -> BoardSnapshot {
        Game::from_notation(fen).unwrap().board_snapshot()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_board_scores_nothing() {
        let empty = BoardSnapshot::empty();
        assert_eq!(material(&empty), MaterialBalance::default());
        assert!(close(piece_square(&empty), 0.0));
        assert!(close(center_control(&empty), 0.0));
        assert!(close(king_safety(&empty), 0.0));
        assert!(close(pawn_structure(&empty), 0.0));
        assert!(close(coordination(&empty), 0.0));
    }

    #[test]
    fn material_counts_both_sides() {
        let start = Game::default().board_snapshot();
        let m = material(&start);
        assert_eq!(m.white, 39);
        assert_eq!(m.black, 39);
        assert_eq!(m.advantage, 0);

        let up_rook = material(&board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
        assert_eq!(up_rook.advantage, 5);
    }

    #[test]
    fn starting_terms_are_balanced() {
        let start = Game::default().board_snapshot();
        assert!(close(piece_square(&start), 0.0));
        assert!(close(center_control(&start), 0.0));
        assert!(close(king_safety(&start), 0.0));
        assert!(close(pawn_structure(&start), 0.0));
        assert!(close(coordination(&start), 0.0));
    }

    #[test]
    fn central_pawn_counts_for_its_side() {
        // e4 occupied (+0.3) and d5 attacked from it (+0.1); f5 is not central.
        let b = board("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(close(center_control(&b), 0.4));
    }

    #[test]
    fn pawn_shield_counts_front_pawns() {
        let b = board("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        assert_eq!(pawn_shield(&b, Square::G1, Color::White), 3);
        assert_eq!(pawn_shield(&b, Square::G8, Color::Black), 0);
        assert!(close(king_safety(&b), 0.9));
    }

    #[test]
    fn doubled_and_isolated_pawns_are_penalised() {
        // White: doubled and isolated a-pawns. Black: healthy f/g pawns.
        let b = board("4k3/5pp1/8/8/8/P7/P7/4K3 w - - 0 1");
        // doubled 0.5 + two isolated pawns 0.6
        assert!(close(pawn_structure(&b), -1.1));
    }

    #[test]
    fn defended_pieces_add_coordination() {
        // Rook a1 and king a2 defend each other.
        let b = board("4k3/8/8/8/8/8/K7/R7 w - - 0 1");
        assert!(close(coordination(&b), 0.1));
    }
}
