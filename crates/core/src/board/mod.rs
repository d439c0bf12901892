//! Board geometry: coordinates, snapshots and ray casting

pub mod coords;
pub mod rays;

use shakmaty::{Board, Color, Piece, Role, Square};

pub use coords::{coords_to_square, is_valid_square, parse_square, square_to_coords, Coords};
pub use rays::{
    attacked_squares, attackers_of, cast_ray, is_square_attacked_by, pieces_along,
    ray_directions, AttackSet, Attacker, Direction, FULL_RANGE,
};

/// Immutable 8x8 copy of piece placement, indexed `[row][col]` with row 0 = rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    grid: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    pub fn from_board(board: &Board) -> Self {
        let mut snapshot = Self::empty();
        for square in Square::ALL {
            snapshot.set(square, board.piece_at(square));
        }
        snapshot
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let c = square_to_coords(square);
        self.grid[c.row as usize][c.col as usize]
    }

    /// Piece at grid coordinates; `None` for empty or off-board.
    pub fn piece_at_coords(&self, row: i8, col: i8) -> Option<Piece> {
        if !is_valid_square(row, col) {
            return None;
        }
        self.grid[row as usize][col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        let c = square_to_coords(square);
        self.grid[c.row as usize][c.col as usize] = piece;
    }

    /// Builder form of [`BoardSnapshot::set`].
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.set(square, Some(piece));
        self
    }

    pub fn grid(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.grid
    }

    /// Occupied squares in reading order (a8, b8, ... h1).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8i8).flat_map(move |row| {
            (0..8i8).filter_map(move |col| {
                let piece = self.grid[row as usize][col as usize]?;
                coords_to_square(row, col).map(|sq| (sq, piece))
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.role == Role::King)
            .map(|(sq, _)| sq)
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lower-case English name of a piece type.
pub fn role_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "pawn",
        Role::Knight => "knight",
        Role::Bishop => "bishop",
        Role::Rook => "rook",
        Role::Queen => "queen",
        Role::King => "king",
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Piece type named by a SAN piece letter (`K`, `Q`, `R`, `B`, `N`), either case.
pub fn role_from_letter(letter: char) -> Option<Role> {
    match letter.to_ascii_uppercase() {
        'K' => Some(Role::King),
        'Q' => Some(Role::Queen),
        'R' => Some(Role::Rook),
        'B' => Some(Role::Bishop),
        'N' => Some(Role::Knight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(role: Role) -> Piece {
        Piece { color: Color::White, role }
    }

    #[test]
    fn snapshot_set_and_get() {
        let board = BoardSnapshot::empty().with_piece(Square::E4, white(Role::Knight));
        assert_eq!(board.piece_at(Square::E4), Some(white(Role::Knight)));
        assert_eq!(board.piece_at(Square::E5), None);
        assert_eq!(board.piece_at_coords(4, 4), Some(white(Role::Knight)));
        assert_eq!(board.piece_at_coords(-1, 4), None);
    }

    #[test]
    fn snapshot_from_starting_board() {
        let board = BoardSnapshot::from_board(&Board::default());
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(board.pieces().next().map(|(sq, _)| sq), Some(Square::A8));
    }

    #[test]
    fn piece_letters() {
        assert_eq!(role_from_letter('n'), Some(Role::Knight));
        assert_eq!(role_from_letter('Q'), Some(Role::Queen));
        assert_eq!(role_from_letter('e'), None);
    }
}
