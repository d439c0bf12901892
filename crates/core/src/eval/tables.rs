//! Piece-square tables
//!
//! Values are bonuses in hundredths of a pawn, laid out from the owner's side:
//! the first row is the owner's back rank. Black reads them rank-mirrored.

use shakmaty::{Color, Piece, Role, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

/// Table index for `square` seen from `color`'s side of the board.
fn relative_index(square: Square, color: Color) -> usize {
    let file = u32::from(square.file()) as usize;
    let rank = u32::from(square.rank()) as usize;
    let rank = match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    };
    rank * 8 + file
}

/// Unsigned table bonus for a piece; only pawns, knights and bishops have tables.
pub fn pst_bonus(piece: Piece, square: Square) -> i32 {
    let table = match piece.role {
        Role::Pawn => &PAWN_PST,
        Role::Knight => &KNIGHT_PST,
        Role::Bishop => &BISHOP_PST,
        _ => return 0,
    };
    table[relative_index(square, piece.color)]
}
