//! Algebraic squares <-> grid coordinates
//!
//! Row 0 is the eighth rank and column 0 is the a-file, so a board printed
//! top to bottom reads row by row.

use shakmaty::{File, Rank, Square};

/// Grid position of a square. Signed so that ray arithmetic can step off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coords {
    pub row: i8,
    pub col: i8,
}

impl Coords {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Coordinates shifted by a direction vector; may be off the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Coords {
        Coords {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    pub fn is_valid(self) -> bool {
        is_valid_square(self.row, self.col)
    }

    pub fn to_square(self) -> Option<Square> {
        coords_to_square(self.row, self.col)
    }
}

pub fn square_to_coords(square: Square) -> Coords {
    let file = u32::from(square.file()) as i8;
    let rank = u32::from(square.rank()) as i8;
    Coords {
        row: 7 - rank,
        col: file,
    }
}

/// Inverse of [`square_to_coords`]. `None` means off the board.
pub fn coords_to_square(row: i8, col: i8) -> Option<Square> {
    if !is_valid_square(row, col) {
        return None;
    }
    let file = File::new(col as u32);
    let rank = Rank::new((7 - row) as u32);
    Some(Square::from_coords(file, rank))
}

pub fn is_valid_square(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// Parses user-facing square text such as `e4` or `E4`.
pub fn parse_square(text: &str) -> Option<Square> {
    let text = text.trim().to_ascii_lowercase();
    if text.len() != 2 {
        return None;
    }
    text.parse().ok()
}
