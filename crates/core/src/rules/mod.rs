//! Rules-engine capability
//!
//! The analysis core never generates moves or judges legality itself. It talks
//! to a [`RulesEngine`], of which [`Game`] (backed by shakmaty) is the
//! production implementation.

mod game;

use serde::Serialize;
use shakmaty::{Color, Piece, Role, Square};

use crate::board::BoardSnapshot;
use crate::error::Result;
use crate::ser;

pub use game::Game;

/// Kind flags of a move, mirroring what a verbose move list reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoveFlags {
    pub capture: bool,
    pub castle_kingside: bool,
    pub castle_queenside: bool,
    pub en_passant: bool,
    pub promotion: bool,
}

/// A legal move with everything the resolver and classifier need to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDescriptor {
    #[serde(serialize_with = "ser::square")]
    pub from: Square,
    /// Destination; for castling this is where the king lands.
    #[serde(serialize_with = "ser::square")]
    pub to: Square,
    #[serde(serialize_with = "ser::role")]
    pub piece: Role,
    #[serde(serialize_with = "ser::color")]
    pub color: Color,
    #[serde(serialize_with = "ser::opt_role")]
    pub captured: Option<Role>,
    #[serde(serialize_with = "ser::opt_role")]
    pub promotion: Option<Role>,
    pub flags: MoveFlags,
    /// SAN including any check (`+`) or mate (`#`) suffix.
    pub san: String,
    /// Long algebraic form, e.g. `e2e4` or `e7e8q`.
    pub uci: String,
}

impl MoveDescriptor {
    /// SAN without check or mate suffix.
    pub fn san_core(&self) -> &str {
        strip_check_suffix(&self.san)
    }

    pub fn is_castle(&self) -> bool {
        self.flags.castle_kingside || self.flags.castle_queenside
    }

    /// Whether `label` names this move, as SAN (suffix optional) or long algebraic.
    pub fn matches_label(&self, label: &str) -> bool {
        let wanted = strip_check_suffix(label.trim());
        !wanted.is_empty() && (wanted == self.san_core() || wanted == self.uci)
    }
}

pub(crate) fn strip_check_suffix(label: &str) -> &str {
    label.trim_end_matches(|c| c == '+' || c == '#')
}

/// Read access to a position plus the one mutation the core may request.
pub trait RulesEngine: Clone + Sized {
    /// Every legal move for the side to move, with verbose metadata.
    fn legal_moves(&self) -> Vec<MoveDescriptor>;

    /// The legal move a label would select, without applying it.
    fn find_move(&self, label: &str) -> Option<MoveDescriptor> {
        self.legal_moves()
            .into_iter()
            .find(|m| m.matches_label(label))
    }

    /// Plays the move named by `label`, or fails with [`crate::Error::IllegalMove`].
    fn apply_move(&mut self, label: &str) -> Result<MoveDescriptor>;

    fn side_to_move(&self) -> Color;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_draw(&self) -> bool;

    fn is_threefold_repetition(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Whether some legal move for the side to move delivers checkmate.
    fn has_mate_in_one(&self) -> bool {
        self.legal_moves().iter().any(|reply| {
            let mut probe = self.clone();
            probe.apply_move(&reply.uci).is_ok() && probe.is_checkmate()
        })
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board_snapshot().piece_at(square)
    }

    fn board_snapshot(&self) -> BoardSnapshot;

    /// Position notation (FEN) of the current position.
    fn notation(&self) -> String;

    fn from_notation(notation: &str) -> Result<Self>;
}

/// Swaps the side-to-move field of a FEN and clears its en-passant field.
pub fn flip_side_to_move(notation: &str) -> Option<String> {
    let mut fields: Vec<&str> = notation.split_whitespace().collect();
    if fields.len() < 2 {
        return None;
    }
    fields[1] = match fields[1] {
        "w" => "b",
        "b" => "w",
        _ => return None,
    };
    if fields.len() > 3 {
        fields[3] = "-";
    }
    Some(fields.join(" "))
}

/// Copy of the position with the other side to move, if the engine accepts it.
///
/// A position where the side that just moved stands in check cannot be flipped;
/// callers treat `None` as "no moves available".
pub fn flipped<E: RulesEngine>(engine: &E) -> Option<E> {
    let notation = flip_side_to_move(&engine.notation())?;
    E::from_notation(&notation).ok()
}

/// Terminal state of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Checkmate {
        #[serde(serialize_with = "ser::color")]
        winner: Color,
    },
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl GameStatus {
    pub fn of<E: RulesEngine>(engine: &E) -> GameStatus {
        if engine.is_checkmate() {
            GameStatus::Checkmate {
                winner: engine.side_to_move().other(),
            }
        } else if engine.is_stalemate() {
            GameStatus::Stalemate
        } else if engine.is_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if engine.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if engine.is_draw() {
            GameStatus::FiftyMoveRule
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    pub fn is_draw(&self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Checkmate { .. })
    }
}
