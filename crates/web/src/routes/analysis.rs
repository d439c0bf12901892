//! Position and move analysis endpoints. Every request carries its own position.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, Piece};

use chess_tactics_core::analysis::ReplaySummary;
use chess_tactics_core::board::{color_name, parse_square, role_name};
use chess_tactics_core::parser::parse_pgn_string;
use chess_tactics_core::resolver::MoveResolution;
use chess_tactics_core::{
    attacked_squares, attackers_of, evaluate, play_turn, EvaluationResult, Game, GameAnalyzer,
    GameStatus, RulesEngine, TurnContext, TurnOutcome, TurnReport,
};

use crate::errors::ApiError;
use crate::AppState;

type Shared = State<Arc<AppState>>;

fn load_position(fen: Option<&str>) -> Result<Game, ApiError> {
    match fen {
        Some(fen) => Ok(Game::from_notation(fen)?),
        None => Ok(Game::new()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub fen: Option<String>,
    pub input: String,
    #[serde(default)]
    pub move_count: u32,
    /// Defaults to the evaluation of the submitted position.
    pub previous_score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolveResponse {
    Played { report: TurnReport },
    Rejected { resolution: MoveResolution },
}

/// POST /resolve
pub async fn resolve(
    State(state): Shared,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let mut game = load_position(req.fen.as_deref())?;
    let ctx = TurnContext {
        move_count: req.move_count,
        previous_score: req
            .previous_score
            .unwrap_or_else(|| evaluate(&game).score),
        config: &state.config.analysis,
    };

    let response = match play_turn(&req.input, &mut game, ctx)? {
        TurnOutcome::Played(report) => ResolveResponse::Played { report },
        TurnOutcome::Rejected(resolution) => ResolveResponse::Rejected { resolution },
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub fen: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub fen: String,
    #[serde(flatten)]
    pub evaluation: EvaluationResult,
    pub status: GameStatus,
}

/// POST /evaluate
pub async fn evaluate_position(
    Json(req): Json<PositionRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let game = Game::from_notation(&req.fen)?;
    Ok(Json(EvaluateResponse {
        fen: game.notation(),
        evaluation: evaluate(&game),
        status: GameStatus::of(&game),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AttacksRequest {
    pub fen: String,
    pub square: String,
}

#[derive(Debug, Serialize)]
pub struct PieceInfo {
    pub color: &'static str,
    pub role: &'static str,
}

impl From<Piece> for PieceInfo {
    fn from(piece: Piece) -> Self {
        PieceInfo {
            color: color_name(piece.color),
            role: role_name(piece.role),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SquareAttacker {
    pub square: String,
    pub piece: PieceInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttacksResponse {
    pub square: String,
    pub piece: Option<PieceInfo>,
    /// Squares the piece on `square` attacks; empty when the square is empty.
    pub attacks: Vec<String>,
    pub white_attackers: Vec<SquareAttacker>,
    pub black_attackers: Vec<SquareAttacker>,
}

/// POST /attacks
pub async fn attacks(Json(req): Json<AttacksRequest>) -> Result<Json<AttacksResponse>, ApiError> {
    let game = Game::from_notation(&req.fen)?;
    let square = parse_square(&req.square)
        .ok_or_else(|| chess_tactics_core::Error::InvalidSquare(req.square.clone()))?;
    let board = game.board_snapshot();
    let piece = board.piece_at(square);

    let attacks = piece
        .map(|p| attacked_squares(&board, square, p))
        .unwrap_or_default()
        .into_iter()
        .map(|sq| sq.to_string())
        .collect();

    let attackers = |color: Color| -> Vec<SquareAttacker> {
        attackers_of(&board, square, color)
            .into_iter()
            .map(|a| SquareAttacker {
                square: a.square.to_string(),
                piece: a.piece.into(),
            })
            .collect()
    };

    Ok(Json(AttacksResponse {
        square: square.to_string(),
        piece: piece.map(PieceInfo::from),
        attacks,
        white_attackers: attackers(Color::White),
        black_attackers: attackers(Color::Black),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
    pub pgn: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReplayEntry {
    pub game: String,
    pub summary: ReplaySummary,
    /// Ply of the first move that could not be resolved, if any.
    pub stopped_at: Option<u32>,
    pub final_fen: String,
    pub status: GameStatus,
}

/// POST /replay
pub async fn replay(
    State(state): Shared,
    Json(req): Json<ReplayRequest>,
) -> Result<Json<Vec<GameReplayEntry>>, ApiError> {
    let analyzer = GameAnalyzer::new(state.config.analysis.clone());
    let mut entries = Vec::new();

    for game in parse_pgn_string(&req.pgn)? {
        let start = load_position(game.initial_fen.as_deref())?;
        let replay = analyzer.replay_from(start, &game.moves)?;
        entries.push(GameReplayEntry {
            game: game.summary(),
            summary: replay.summary(),
            stopped_at: replay.stopped.as_ref().map(|stop| stop.ply),
            final_fen: replay.final_fen,
            status: replay.status,
        });
    }

    Ok(Json(entries))
}
