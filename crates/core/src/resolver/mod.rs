//! Move resolver: free-form text to one legal move
//!
//! The input is run through [`Strategy::ORDER`]. Each strategy only looks a
//! move up; the first hit is then played exactly once. When nothing matches
//! the position is left untouched and a [`Suggestion`] comes back instead.

mod strategies;
mod suggestion;

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::rules::{MoveDescriptor, RulesEngine};

pub use strategies::{clean_input, fuzzy, normalize, Strategy};
pub use suggestion::{suggest, Suggestion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveResolution {
    Success {
        #[serde(rename = "move")]
        mv: MoveDescriptor,
        strategy: Strategy,
    },
    Failure {
        input: String,
        suggestion: Suggestion,
    },
}

impl MoveResolution {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveResolution::Success { .. })
    }

    pub fn accepted(&self) -> Option<&MoveDescriptor> {
        match self {
            MoveResolution::Success { mv, .. } => Some(mv),
            MoveResolution::Failure { .. } => None,
        }
    }
}

/// The move `raw` would resolve to and the strategy that found it. Pure.
pub fn lookup<E: RulesEngine>(raw: &str, engine: &E) -> Option<(Strategy, MoveDescriptor)> {
    let input = clean_input(raw);
    Strategy::ORDER
        .into_iter()
        .find_map(|strategy| strategy.attempt(&input, engine).map(|mv| (strategy, mv)))
}

/// Resolves `raw` with default limits and plays the move if one is found.
pub fn resolve_move<E: RulesEngine>(raw: &str, engine: &mut E) -> Result<MoveResolution> {
    resolve_move_with(raw, engine, &AnalysisConfig::default())
}

/// Resolves `raw` and plays the move if one is found.
///
/// An `Err` means the engine refused a move it had listed as legal.
pub fn resolve_move_with<E: RulesEngine>(
    raw: &str,
    engine: &mut E,
    config: &AnalysisConfig,
) -> Result<MoveResolution> {
    match lookup(raw, engine) {
        Some((strategy, found)) => {
            let mv = engine.apply_move(&found.uci)?;
            debug!(
                input = raw,
                strategy = strategy.as_str(),
                san = %mv.san,
                "resolved move"
            );
            Ok(MoveResolution::Success { mv, strategy })
        }
        None => {
            debug!(input = raw, "no strategy matched input");
            let suggestion = suggest(
                &clean_input(raw),
                &engine.legal_moves(),
                config.piece_suggestion_limit,
                config.generic_suggestion_limit,
            );
            Ok(MoveResolution::Failure {
                input: raw.to_string(),
                suggestion,
            })
        }
    }
}
