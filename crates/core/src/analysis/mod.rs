//! Per-turn analysis and game replay
//!
//! Ties the resolver, classifier and evaluator together in the order a turn
//! flows through them, and grades each move.

mod analyzer;
mod types;

pub use analyzer::{play_turn, GameAnalyzer, TurnContext};
pub use types::{GameReplay, MoveQuality, ReplayStop, ReplaySummary, TurnOutcome, TurnReport};
