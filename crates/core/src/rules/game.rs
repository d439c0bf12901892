//! shakmaty-backed rules engine

use shakmaty::{
    fen::Fen, san::San, CastlingMode, Chess, Color, EnPassantMode, File, Move, Piece, Position,
    Role, Square,
};
use tracing::warn;

use super::{MoveDescriptor, MoveFlags, RulesEngine};
use crate::board::BoardSnapshot;
use crate::error::{Error, Result};

/// A position plus the history needed to spot repetitions.
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    /// Repetition keys of every position reached, current one last.
    history: Vec<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_position(position: Chess) -> Self {
        let history = vec![repetition_key(&position)];
        Self { position, history }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of half-moves played since this game was created.
    pub fn plies(&self) -> usize {
        self.history.len() - 1
    }

    fn illegal(&self, label: &str) -> Error {
        Error::IllegalMove {
            label: label.to_string(),
            position: self.notation(),
        }
    }

    fn lookup(&self, label: &str) -> Option<(Move, MoveDescriptor)> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| (m.clone(), describe(&self.position, m)))
            .find(|(_, d)| d.matches_label(label))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for Game {
    fn legal_moves(&self) -> Vec<MoveDescriptor> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| describe(&self.position, m))
            .collect()
    }

    fn find_move(&self, label: &str) -> Option<MoveDescriptor> {
        self.lookup(label).map(|(_, d)| d)
    }

    fn apply_move(&mut self, label: &str) -> Result<MoveDescriptor> {
        let Some((mv, descriptor)) = self.lookup(label) else {
            warn!(label, "rules engine found no legal move for label");
            return Err(self.illegal(label));
        };

        match self.position.clone().play(mv) {
            Ok(next) => {
                self.history.push(repetition_key(&next));
                self.position = next;
                Ok(descriptor)
            }
            Err(_) => {
                warn!(label, "rules engine refused a listed legal move");
                Err(self.illegal(label))
            }
        }
    }

    fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
            || self.position.halfmoves() >= 100
    }

    fn is_threefold_repetition(&self) -> bool {
        match self.history.last() {
            Some(current) => self.history.iter().filter(|k| *k == current).count() >= 3,
            None => false,
        }
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn has_mate_in_one(&self) -> bool {
        self.position.legal_moves().iter().any(|m| {
            self.position
                .clone()
                .play(m.clone())
                .is_ok_and(|next| next.is_checkmate())
        })
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self.position.board())
    }

    fn notation(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn from_notation(notation: &str) -> Result<Self> {
        let parsed: Fen = notation
            .trim()
            .parse()
            .map_err(|e| Error::InvalidNotation(format!("{}", e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::InvalidNotation(format!("{}", e)))?;
        Ok(Self::from_position(position))
    }
}

/// Board, side to move, castling rights and en-passant square; clocks excluded.
fn repetition_key(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal)
        .to_string()
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(position: &Chess, mv: &Move) -> MoveDescriptor {
    let mut flags = MoveFlags::default();

    let (from, to, piece, captured, promotion) = match mv {
        Move::Normal {
            role,
            from,
            capture,
            to,
            promotion,
        } => (*from, *to, *role, *capture, *promotion),
        Move::EnPassant { from, to } => {
            flags.en_passant = true;
            (*from, *to, Role::Pawn, Some(Role::Pawn), None)
        }
        Move::Castle { king, rook } => {
            let king_to = if rook.file() > king.file() {
                flags.castle_kingside = true;
                Square::from_coords(File::G, king.rank())
            } else {
                flags.castle_queenside = true;
                Square::from_coords(File::C, king.rank())
            };
            (*king, king_to, Role::King, None, None)
        }
        Move::Put { role, to } => (*to, *to, *role, None, None),
    };
    flags.capture = captured.is_some();
    flags.promotion = promotion.is_some();

    let suffix = match position.clone().play(mv.clone()) {
        Ok(next) if next.is_checkmate() => "#",
        Ok(next) if next.is_check() => "+",
        _ => "",
    };
    let san = format!("{}{}", San::from_move(position, mv.clone()), suffix);

    MoveDescriptor {
        from,
        to,
        piece,
        color: position.turn(),
        captured,
        promotion,
        flags,
        san,
        uci: uci_label(from, to, promotion),
    }
}

fn uci_label(from: Square, to: Square, promotion: Option<Role>) -> String {
    let promo = promotion
        .map(|r| match r {
            Role::Queen => "q",
            Role::Rook => "r",
            Role::Bishop => "b",
            Role::Knight => "n",
            _ => "",
        })
        .unwrap_or("");
    format!("{}{}{}", from, to, promo)
}
