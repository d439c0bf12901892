//! Turn and replay report types

use serde::Serialize;
use shakmaty::Color;

use crate::eval::EvaluationResult;
use crate::phase::GamePhase;
use crate::resolver::MoveResolution;
use crate::rules::{GameStatus, MoveDescriptor};
use crate::tactics::TacticsRecord;

/// How good a move looks, judged from its tactics and the evaluation swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveQuality {
    Checkmate,
    Brilliant,
    Great,
    Good,
    Mistake,
    Blunder,
}

impl MoveQuality {
    /// Grades a move; scores are white-positive and `mover` is the side that played.
    pub fn grade(tactics: &TacticsRecord, previous: f64, current: f64, mover: Color) -> Self {
        let swing = (current - previous).abs();

        if tactics.is_checkmate {
            return MoveQuality::Checkmate;
        }

        let motif_count = [
            tactics.is_fork,
            tactics.is_pin,
            tactics.is_skewer,
            tactics.is_discovered_attack,
            tactics.is_check,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count();

        let brilliant = (tactics.is_sacrifice && swing > 2.0)
            || (tactics.is_fork && tactics.is_check)
            || (tactics.is_discovered_attack && tactics.is_mating_threat)
            || (motif_count >= 2 && swing > 1.5);
        if brilliant {
            return MoveQuality::Brilliant;
        }

        let sign = match mover {
            Color::White => 1.0,
            Color::Black => -1.0,
        };
        let worsened = current * sign < previous * sign;
        if (swing > 3.0 && worsened) || (tactics.is_sacrifice && swing < 0.5) {
            return MoveQuality::Blunder;
        }

        if (tactics.is_fork || tactics.is_pin || tactics.is_discovered_attack) && swing > 1.0 {
            return MoveQuality::Great;
        }

        if swing > 1.5 && swing < 3.0 {
            return MoveQuality::Mistake;
        }

        MoveQuality::Good
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveQuality::Checkmate => "checkmate",
            MoveQuality::Brilliant => "brilliant",
            MoveQuality::Great => "great",
            MoveQuality::Good => "good",
            MoveQuality::Mistake => "mistake",
            MoveQuality::Blunder => "blunder",
        }
    }
}

/// Everything derived from one accepted move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    /// 1-based half-move number.
    pub ply: u32,
    #[serde(rename = "move")]
    pub mv: MoveDescriptor,
    pub tactics: TacticsRecord,
    pub evaluation: EvaluationResult,
    pub status: GameStatus,
    pub phase: GamePhase,
    pub quality: MoveQuality,
    pub fen_before: String,
    pub fen_after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    Played(TurnReport),
    Rejected(MoveResolution),
}

impl TurnOutcome {
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            TurnOutcome::Played(report) => Some(report),
            TurnOutcome::Rejected(_) => None,
        }
    }
}

/// Input the replay could not place, and where.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStop {
    pub ply: u32,
    pub resolution: MoveResolution,
}

/// Result of replaying a list of moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReplay {
    pub turns: Vec<TurnReport>,
    /// Set when a move could not be resolved; later moves were not looked at.
    pub stopped: Option<ReplayStop>,
    pub final_fen: String,
    pub status: GameStatus,
}

impl GameReplay {
    pub fn plies_analysed(&self) -> usize {
        self.turns.len()
    }

    pub fn summary(&self) -> ReplaySummary {
        let mut summary = ReplaySummary {
            plies: self.turns.len() as u32,
            completed: self.stopped.is_none(),
            ..ReplaySummary::default()
        };
        for turn in &self.turns {
            match turn.quality {
                MoveQuality::Checkmate => summary.checkmates += 1,
                MoveQuality::Brilliant => summary.brilliant += 1,
                MoveQuality::Great => summary.great += 1,
                MoveQuality::Good => summary.good += 1,
                MoveQuality::Mistake => summary.mistakes += 1,
                MoveQuality::Blunder => summary.blunders += 1,
            }
        }
        summary
    }
}

/// Move-quality tally for a replayed game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub plies: u32,
    pub completed: bool,
    pub checkmates: u32,
    pub brilliant: u32,
    pub great: u32,
    pub good: u32,
    pub mistakes: u32,
    pub blunders: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tactics() -> TacticsRecord {
        TacticsRecord::default()
    }

    #[test]
    fn checkmate_beats_everything() {
        let record = TacticsRecord {
            is_check: true,
            is_checkmate: true,
            is_sacrifice: true,
            ..tactics()
        };
        assert_eq!(MoveQuality::grade(&record, 0.0, 0.1, Color::White), MoveQuality::Checkmate);
    }

    #[test]
    fn brilliant_conditions() {
        let checking_fork = TacticsRecord {
            is_fork: true,
            is_check: true,
            ..tactics()
        };
        assert_eq!(MoveQuality::grade(&checking_fork, 0.0, 0.0, Color::White), MoveQuality::Brilliant);

        let sacrifice = TacticsRecord {
            is_sacrifice: true,
            ..tactics()
        };
        assert_eq!(MoveQuality::grade(&sacrifice, 0.0, 2.5, Color::White), MoveQuality::Brilliant);

        let pin_and_check = TacticsRecord {
            is_pin: true,
            is_check: true,
            ..tactics()
        };
        assert_eq!(MoveQuality::grade(&pin_and_check, 0.0, 1.6, Color::White), MoveQuality::Brilliant);
        assert_eq!(MoveQuality::grade(&pin_and_check, 0.0, 1.2, Color::White), MoveQuality::Great);
    }

    #[test]
    fn blunder_depends_on_mover() {
        // White to black-much-better: bad for white, good for black.
        assert_eq!(MoveQuality::grade(&tactics(), 0.5, -3.0, Color::White), MoveQuality::Blunder);
        assert_eq!(MoveQuality::grade(&tactics(), 0.5, -3.0, Color::Black), MoveQuality::Good);

        let cheap_sacrifice = TacticsRecord {
            is_sacrifice: true,
            ..tactics()
        };
        assert_eq!(MoveQuality::grade(&cheap_sacrifice, 0.0, 0.2, Color::Black), MoveQuality::Blunder);
    }

    #[test]
    fn mistake_and_good() {
        assert_eq!(MoveQuality::grade(&tactics(), 0.0, 2.0, Color::White), MoveQuality::Mistake);
        assert_eq!(MoveQuality::grade(&tactics(), 0.0, 0.3, Color::White), MoveQuality::Good);
        assert_eq!(MoveQuality::Mistake.as_str(), "mistake");
    }
}
