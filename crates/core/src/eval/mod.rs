//! Heuristic position evaluation
//!
//! A cheap, static scorer for commentary: material plus a handful of
//! positional terms, in pawns, positive for white. No search is done.

mod tables;
mod terms;

use serde::Serialize;
use shakmaty::Color;
use tracing::trace;

use crate::board::BoardSnapshot;
use crate::rules::{flipped, RulesEngine};

pub use tables::pst_bonus;
pub use terms::{
    center_control, coordination, king_safety, material, pawn_shield, pawn_structure,
    piece_square, MaterialBalance,
};

/// Contribution of every term to the final score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EvalTerms {
    pub material: f64,
    pub piece_square: f64,
    pub center_control: f64,
    pub king_safety: f64,
    pub pawn_structure: f64,
    pub mobility: f64,
    pub coordination: f64,
}

impl EvalTerms {
    pub fn total(&self) -> f64 {
        self.material
            + self.piece_square
            + self.center_control
            + self.king_safety
            + self.pawn_structure
            + self.mobility
            + self.coordination
    }
}

/// Coarse verdict derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationLabel {
    WhiteMuchBetter,
    WhiteSlightlyBetter,
    Equal,
    BlackSlightlyBetter,
    BlackMuchBetter,
}

impl EvaluationLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 3.0 {
            EvaluationLabel::WhiteMuchBetter
        } else if score > 1.0 {
            EvaluationLabel::WhiteSlightlyBetter
        } else if score > -1.0 {
            EvaluationLabel::Equal
        } else if score > -3.0 {
            EvaluationLabel::BlackSlightlyBetter
        } else {
            EvaluationLabel::BlackMuchBetter
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EvaluationLabel::WhiteMuchBetter => "White is much better",
            EvaluationLabel::WhiteSlightlyBetter => "White is slightly better",
            EvaluationLabel::Equal => "Equal position",
            EvaluationLabel::BlackSlightlyBetter => "Black is slightly better",
            EvaluationLabel::BlackMuchBetter => "Black is much better",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub score: f64,
    pub material: MaterialBalance,
    pub terms: EvalTerms,
    pub label: EvaluationLabel,
    pub description: &'static str,
}

impl EvaluationResult {
    fn from_terms(material: MaterialBalance, terms: EvalTerms) -> Self {
        let score = terms.total();
        let label = EvaluationLabel::from_score(score);
        EvaluationResult {
            score,
            material,
            terms,
            label,
            description: label.description(),
        }
    }
}

/// Scores the engine's current position. Never fails, terminal positions included.
pub fn evaluate<E: RulesEngine>(engine: &E) -> EvaluationResult {
    let board = engine.board_snapshot();
    let mut terms = board_terms(&board);
    terms.mobility = mobility(engine);

    trace!(
        material = terms.material,
        piece_square = terms.piece_square,
        center_control = terms.center_control,
        king_safety = terms.king_safety,
        pawn_structure = terms.pawn_structure,
        mobility = terms.mobility,
        coordination = terms.coordination,
        "evaluation terms"
    );

    EvaluationResult::from_terms(material(&board), terms)
}

/// Evaluates placement alone; mobility needs a rules engine and is left at zero.
pub fn evaluate_board(board: &BoardSnapshot) -> EvaluationResult {
    EvaluationResult::from_terms(material(board), board_terms(board))
}

fn board_terms(board: &BoardSnapshot) -> EvalTerms {
    EvalTerms {
        material: material(board).advantage as f64,
        piece_square: piece_square(board),
        center_control: center_control(board),
        king_safety: king_safety(board),
        pawn_structure: pawn_structure(board),
        mobility: 0.0,
        coordination: coordination(board),
    }
}

/// Legal-move difference between the side to move and its opponent, signed for white.
///
/// The opponent's count comes from a turn-flipped copy; when the engine rejects
/// that copy (side to move in check) the opponent counts as having no moves.
pub fn mobility<E: RulesEngine>(engine: &E) -> f64 {
    let own = engine.legal_moves().len() as f64;
    let other = flipped(engine)
        .map(|copy| copy.legal_moves().len())
        .unwrap_or(0) as f64;
    let score = (own - other) * 0.05;
    match engine.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
