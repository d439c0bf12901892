//! Chess Tactics Core Library
//!
//! Resolves loosely typed move input, classifies the tactics of the move just
//! played and scores the resulting position. Legality, move generation and
//! position notation belong to a [`RulesEngine`]; [`Game`] is the shakmaty-backed
//! implementation.

pub mod analysis;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod parser;
pub mod phase;
pub mod resolver;
pub mod rules;
pub mod tactics;
pub mod values;

mod ser;

pub use analysis::{play_turn, GameAnalyzer, MoveQuality, TurnContext, TurnOutcome, TurnReport};
pub use board::{attacked_squares, attackers_of, is_square_attacked_by, BoardSnapshot};
pub use config::{AnalysisConfig, MatingThreatMode};
pub use error::{Error, Result};
pub use eval::{evaluate, EvaluationLabel, EvaluationResult};
pub use phase::GamePhase;
pub use resolver::{resolve_move, resolve_move_with, MoveResolution, Suggestion};
pub use rules::{Game, GameStatus, MoveDescriptor, RulesEngine};
pub use tactics::{classify_tactics, TacticsRecord};
