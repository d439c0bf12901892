//! Ray casting and attack maps
//!
//! Everything here is a pure function of a [`BoardSnapshot`]. A ray stops at
//! (and includes) the first occupied square, friend or foe, which is exactly a
//! sliding piece's line of sight.

use serde::Serialize;
use shakmaty::{Bitboard, Color, Piece, Role, Square};

use super::coords::{coords_to_square, square_to_coords, Coords};
use super::BoardSnapshot;
use crate::ser;

/// Step vector as `(d_row, d_col)`.
pub type Direction = (i8, i8);

/// Set of squares a piece threatens.
pub type AttackSet = Bitboard;

/// Longest possible ray on an 8x8 board, used as the default cast distance.
pub const FULL_RANGE: u8 = 8;

const ORTHOGONAL: [Direction; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_LINES: [Direction; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_JUMPS: [Direction; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A piece that attacks some square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attacker {
    #[serde(serialize_with = "ser::square")]
    pub square: Square,
    #[serde(serialize_with = "ser::piece")]
    pub piece: Piece,
}

/// Movement directions of a piece type.
///
/// Knight entries are single jumps, not rays. Pawns have none: their attacks
/// depend on colour and are handled by [`attacked_squares`].
pub fn ray_directions(role: Role) -> &'static [Direction] {
    match role {
        Role::Rook => &ORTHOGONAL,
        Role::Bishop => &DIAGONAL,
        Role::Queen | Role::King => &ALL_LINES,
        Role::Knight => &KNIGHT_JUMPS,
        Role::Pawn => &[],
    }
}

pub fn is_slider(role: Role) -> bool {
    matches!(role, Role::Rook | Role::Bishop | Role::Queen)
}

/// Squares from `origin` along `direction`, up to `max_distance` steps,
/// ending early at the first occupied square (inclusive) or the board edge.
pub fn cast_ray(
    board: &BoardSnapshot,
    origin: Square,
    direction: Direction,
    max_distance: u8,
) -> Vec<Square> {
    let (d_row, d_col) = direction;
    let mut squares = Vec::new();
    let mut at = square_to_coords(origin).offset(d_row, d_col);

    while squares.len() < max_distance as usize {
        let Some(square) = at.to_square() else {
            break;
        };
        squares.push(square);
        if board.piece_at(square).is_some() {
            break;
        }
        at = at.offset(d_row, d_col);
    }

    squares
}

/// The first `count` pieces met walking from `origin` along `direction`,
/// looking through each one to the next.
pub fn pieces_along(
    board: &BoardSnapshot,
    origin: Square,
    direction: Direction,
    count: usize,
) -> Vec<(Square, Piece)> {
    let mut found = Vec::with_capacity(count);
    let mut from = origin;

    while found.len() < count {
        let ray = cast_ray(board, from, direction, FULL_RANGE);
        let Some(&last) = ray.last() else {
            break;
        };
        match board.piece_at(last) {
            Some(piece) => {
                found.push((last, piece));
                from = last;
            }
            None => break,
        }
    }

    found
}

/// Squares threatened by `piece` standing on `origin`.
///
/// Pawn attacks are the two forward diagonals whether or not they are
/// occupied, so the set also answers "is this square defended".
pub fn attacked_squares(board: &BoardSnapshot, origin: Square, piece: Piece) -> AttackSet {
    let at = square_to_coords(origin);

    match piece.role {
        Role::Pawn => {
            let forward = if piece.color == Color::White { -1 } else { 1 };
            [-1, 1]
                .into_iter()
                .filter_map(|d_col| at.offset(forward, d_col).to_square())
                .collect()
        }
        Role::Knight | Role::King => jump_targets(at, ray_directions(piece.role)),
        Role::Bishop | Role::Rook | Role::Queen => ray_directions(piece.role)
            .iter()
            .flat_map(|&dir| cast_ray(board, origin, dir, FULL_RANGE))
            .collect(),
    }
}

fn jump_targets(at: Coords, offsets: &[Direction]) -> AttackSet {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| coords_to_square(at.row + d_row, at.col + d_col))
        .collect()
}

pub fn is_square_attacked_by(board: &BoardSnapshot, square: Square, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, piece)| attacked_squares(board, from, piece).contains(square))
}

/// Every piece of `color` that attacks `square`, in board reading order.
pub fn attackers_of(board: &BoardSnapshot, square: Square, color: Color) -> Vec<Attacker> {
    board
        .pieces_of(color)
        .filter(|&(from, piece)| attacked_squares(board, from, piece).contains(square))
        .map(|(from, piece)| Attacker {
            square: from,
            piece,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(color: Color, role: Role) -> Piece {
        Piece { color, role }
    }

    fn squares(set: AttackSet) -> Vec<String> {
        let mut out: Vec<String> = set.into_iter().map(|sq| sq.to_string()).collect();
        out.sort();
        out
    }

    #[test]
    fn ray_stops_at_first_piece_inclusive() {
        let board = BoardSnapshot::empty()
            .with_piece(Square::A1, piece(Color::White, Role::Rook))
            .with_piece(Square::A4, piece(Color::Black, Role::Pawn));
        let ray = cast_ray(&board, Square::A1, (-1, 0), FULL_RANGE);
        assert_eq!(ray, vec![Square::A2, Square::A3, Square::A4]);
    }

    #[test]
    fn ray_off_board_is_empty() {
        let board = BoardSnapshot::empty();
        assert!(cast_ray(&board, Square::H8, (-1, 0), FULL_RANGE).is_empty());
        assert!(cast_ray(&board, Square::H8, (0, 1), FULL_RANGE).is_empty());
    }

    #[test]
    fn ray_honours_max_distance() {
        let board = BoardSnapshot::empty();
        let ray = cast_ray(&board, Square::D4, (-1, 1), 2);
        assert_eq!(ray, vec![Square::E5, Square::F6]);
    }

    #[test]
    fn rays_never_pass_a_blocker() {
        let board = BoardSnapshot::empty()
            .with_piece(Square::D4, piece(Color::White, Role::Queen))
            .with_piece(Square::F6, piece(Color::White, Role::Pawn))
            .with_piece(Square::D7, piece(Color::Black, Role::Knight))
            .with_piece(Square::B4, piece(Color::Black, Role::Bishop));
        for &dir in ray_directions(Role::Queen) {
            let ray = cast_ray(&board, Square::D4, dir, FULL_RANGE);
            let occupied: Vec<_> = ray.iter().filter(|sq| board.piece_at(**sq).is_some()).collect();
            assert!(occupied.len() <= 1);
            if let Some(first) = occupied.first() {
                assert_eq!(ray.last(), Some(*first));
            }
        }
    }

    #[test]
    fn knight_in_corner() {
        let board = BoardSnapshot::empty();
        let set = attacked_squares(&board, Square::A1, piece(Color::White, Role::Knight));
        assert_eq!(squares(set), vec!["b3", "c2"]);
    }

    #[test]
    fn king_is_capped_at_one_step() {
        let board = BoardSnapshot::empty();
        let set = attacked_squares(&board, Square::E1, piece(Color::White, Role::King));
        assert_eq!(squares(set), vec!["d1", "d2", "e2", "f1", "f2"]);
    }

    #[test]
    fn pawn_attacks_depend_on_colour() {
        let board = BoardSnapshot::empty();
        let white = attacked_squares(&board, Square::E4, piece(Color::White, Role::Pawn));
        let black = attacked_squares(&board, Square::E4, piece(Color::Black, Role::Pawn));
        assert_eq!(squares(white), vec!["d5", "f5"]);
        assert_eq!(squares(black), vec!["d3", "f3"]);

        let edge = attacked_squares(&board, Square::A2, piece(Color::White, Role::Pawn));
        assert_eq!(squares(edge), vec!["b3"]);
    }

    #[test]
    fn bishop_blocked_by_own_piece_still_covers_it() {
        let board = BoardSnapshot::empty()
            .with_piece(Square::C1, piece(Color::White, Role::Bishop))
            .with_piece(Square::D2, piece(Color::White, Role::Pawn));
        let set = attacked_squares(&board, Square::C1, piece(Color::White, Role::Bishop));
        assert_eq!(squares(set), vec!["a3", "b2", "d2"]);
    }

    #[test]
    fn attackers_of_square() {
        let board = BoardSnapshot::empty()
            .with_piece(Square::E1, piece(Color::White, Role::Rook))
            .with_piece(Square::C3, piece(Color::White, Role::Knight))
            .with_piece(Square::D4, piece(Color::White, Role::Pawn))
            .with_piece(Square::E8, piece(Color::Black, Role::Rook));

        let white = attackers_of(&board, Square::E5, Color::White);
        let from: Vec<Square> = white.iter().map(|a| a.square).collect();
        assert_eq!(from, vec![Square::D4, Square::E1]);

        assert!(is_square_attacked_by(&board, Square::E5, Color::Black));
        assert!(!is_square_attacked_by(&board, Square::A8, Color::White));
        assert!(attackers_of(&board, Square::H5, Color::White).is_empty());
    }

    #[test]
    fn pieces_along_looks_through() {
        let board = BoardSnapshot::empty()
            .with_piece(Square::B2, piece(Color::White, Role::Bishop))
            .with_piece(Square::D4, piece(Color::Black, Role::Knight))
            .with_piece(Square::F6, piece(Color::Black, Role::King));
        let line = pieces_along(&board, Square::B2, (-1, 1), 2);
        assert_eq!(line.len(), 2);
        assert_eq!(line[0].0, Square::D4);
        assert_eq!(line[1].0, Square::F6);

        let lonely = pieces_along(&board, Square::B2, (-1, -1), 2);
        assert!(lonely.is_empty());
    }
}
