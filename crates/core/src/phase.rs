//! Game phase derivation

use serde::{Deserialize, Serialize};
use shakmaty::Role;

use crate::board::BoardSnapshot;
use crate::config::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// Phase from the caller's move counter and the pieces left on the board.
    pub fn classify(move_count: u32, board: &BoardSnapshot, config: &AnalysisConfig) -> GamePhase {
        if move_count < config.opening_move_threshold {
            GamePhase::Opening
        } else if minor_and_major_pieces(board) <= config.endgame_piece_threshold {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        }
    }
}

/// Queens, rooks, bishops and knights of both colours.
fn minor_and_major_pieces(board: &BoardSnapshot) -> u32 {
    board
        .pieces()
        .filter(|(_, p)| !matches!(p.role, Role::Pawn | Role::King))
        .count() as u32
}
