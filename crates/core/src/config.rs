//! Analysis configuration

use serde::{Deserialize, Serialize};

/// How the mating-threat flag is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatingThreatMode {
    /// A reply from the resulting position mates, regardless of history.
    Absolute,
    /// As `Absolute`, but only when that side had no mate in one before the move.
    NetNew,
}

impl MatingThreatMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "absolute" => Some(MatingThreatMode::Absolute),
            "net-new" | "netnew" | "net_new" => Some(MatingThreatMode::NetNew),
            _ => None,
        }
    }
}

/// Tunables shared by the resolver, classifier and phase detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Candidate moves listed when the input names a piece.
    pub piece_suggestion_limit: usize,
    /// Candidate moves listed when the input is not recognised at all.
    pub generic_suggestion_limit: usize,
    pub mating_threat: MatingThreatMode,
    /// Plies before which the game counts as an opening.
    pub opening_move_threshold: u32,
    /// Non-pawn, non-king pieces left at or below which the game is an endgame.
    pub endgame_piece_threshold: u32,
}

impl AnalysisConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AnalysisConfig::default();
        AnalysisConfig {
            piece_suggestion_limit: env_parse("CHESS_SUGGESTION_LIMIT")
                .unwrap_or(defaults.piece_suggestion_limit),
            generic_suggestion_limit: env_parse("CHESS_GENERIC_SUGGESTION_LIMIT")
                .unwrap_or(defaults.generic_suggestion_limit),
            mating_threat: std::env::var("CHESS_MATING_THREAT")
                .ok()
                .and_then(|v| MatingThreatMode::parse(&v))
                .unwrap_or(defaults.mating_threat),
            opening_move_threshold: env_parse("CHESS_OPENING_MOVES")
                .unwrap_or(defaults.opening_move_threshold),
            endgame_piece_threshold: env_parse("CHESS_ENDGAME_PIECES")
                .unwrap_or(defaults.endgame_piece_threshold),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            piece_suggestion_limit: 5,
            generic_suggestion_limit: 8,
            mating_threat: MatingThreatMode::Absolute,
            opening_move_threshold: 10,
            endgame_piece_threshold: 6,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
