//! Turn pipeline and whole-game replay

use tracing::info;

use super::types::*;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::eval::evaluate;
use crate::parser::parse_pgn_string;
use crate::phase::GamePhase;
use crate::resolver::{resolve_move_with, MoveResolution};
use crate::rules::{Game, GameStatus, RulesEngine};
use crate::tactics::classify_tactics_with;

/// Caller-owned state a single turn needs.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// Half-moves already played before this one.
    pub move_count: u32,
    /// Evaluation after the previous move, white-positive.
    pub previous_score: f64,
    pub config: &'a AnalysisConfig,
}

impl<'a> TurnContext<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        TurnContext {
            move_count: 0,
            previous_score: 0.0,
            config,
        }
    }
}

/// Resolves `raw`, plays it once, then classifies, evaluates and grades it.
///
/// Unresolvable input comes back as [`TurnOutcome::Rejected`] with the position
/// unchanged. An `Err` means the engine refused a move it listed as legal.
pub fn play_turn<E: RulesEngine>(raw: &str, engine: &mut E, ctx: TurnContext<'_>) -> Result<TurnOutcome> {
    let before = engine.clone();

    let mv = match resolve_move_with(raw, engine, ctx.config)? {
        MoveResolution::Success { mv, .. } => mv,
        rejected @ MoveResolution::Failure { .. } => return Ok(TurnOutcome::Rejected(rejected)),
    };

    let ply = ctx.move_count + 1;
    let tactics = classify_tactics_with(&mv, &before, engine, ctx.config.mating_threat);
    let evaluation = evaluate(engine);
    let status = GameStatus::of(engine);
    let phase = GamePhase::classify(ply, &engine.board_snapshot(), ctx.config);
    let quality = MoveQuality::grade(&tactics, ctx.previous_score, evaluation.score, mv.color);

    Ok(TurnOutcome::Played(TurnReport {
        ply,
        mv,
        tactics,
        evaluation,
        status,
        phase,
        quality,
        fen_before: before.notation(),
        fen_after: engine.notation(),
    }))
}

/// Replays whole games through [`play_turn`].
pub struct GameAnalyzer {
    config: AnalysisConfig,
}

impl GameAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replays `moves` from the standard starting position.
    pub fn replay<S: AsRef<str>>(&self, moves: &[S]) -> Result<GameReplay> {
        self.replay_from(Game::new(), moves)
    }

    /// Replays `moves` from `engine`'s position, stopping at the first move
    /// that cannot be resolved.
    pub fn replay_from<E: RulesEngine, S: AsRef<str>>(&self, mut engine: E, moves: &[S]) -> Result<GameReplay> {
        let mut turns: Vec<TurnReport> = Vec::with_capacity(moves.len());
        let mut stopped = None;
        let mut previous_score = evaluate(&engine).score;

        for (index, raw) in moves.iter().enumerate() {
            let ctx = TurnContext {
                move_count: index as u32,
                previous_score,
                config: &self.config,
            };
            match play_turn(raw.as_ref(), &mut engine, ctx)? {
                TurnOutcome::Played(report) => {
                    previous_score = report.evaluation.score;
                    turns.push(report);
                }
                TurnOutcome::Rejected(resolution) => {
                    stopped = Some(ReplayStop {
                        ply: index as u32 + 1,
                        resolution,
                    });
                    break;
                }
            }
        }

        let replay = GameReplay {
            turns,
            stopped,
            final_fen: engine.notation(),
            status: GameStatus::of(&engine),
        };
        info!(
            plies = replay.plies_analysed(),
            completed = replay.stopped.is_none(),
            "replayed game"
        );
        Ok(replay)
    }

    /// Replays the main line of every game in `pgn`.
    pub fn replay_pgn(&self, pgn: &str) -> Result<Vec<GameReplay>> {
        parse_pgn_string(pgn)?
            .into_iter()
            .map(|game| {
                let start = match game.initial_fen.as_deref() {
                    Some(fen) => Game::from_notation(fen)?,
                    None => Game::new(),
                };
                self.replay_from(start, &game.moves)
            })
            .collect()
    }
}

impl Default for GameAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
