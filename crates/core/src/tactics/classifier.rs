//! Tactical classification of a move just played

use shakmaty::{Piece, Role, Square};

use super::types::TacticsRecord;
use crate::board::rays::is_slider;
use crate::board::{
    attacked_squares, cast_ray, is_square_attacked_by, pieces_along, ray_directions,
    BoardSnapshot, FULL_RANGE,
};
use crate::config::MatingThreatMode;
use crate::rules::{flipped, MoveDescriptor, RulesEngine};
use crate::values::{material_value, tactical_value};

/// Cheapest piece that still counts as a loose fork target.
const MINOR_VALUE: i32 = 3;

/// Classifies `mv`, already played to get from `before` to `after`.
pub fn classify_tactics<E: RulesEngine>(mv: &MoveDescriptor, before: &E, after: &E) -> TacticsRecord {
    classify_tactics_with(mv, before, after, MatingThreatMode::Absolute)
}

pub fn classify_tactics_with<E: RulesEngine>(
    mv: &MoveDescriptor,
    before: &E,
    after: &E,
    mode: MatingThreatMode,
) -> TacticsRecord {
    let mut record = TacticsRecord {
        is_check: after.is_check(),
        is_checkmate: after.is_checkmate(),
        is_capture: mv.flags.capture,
        is_castling: mv.is_castle(),
        is_en_passant: mv.flags.en_passant,
        is_promotion: mv.flags.promotion,
        captured_piece: mv.captured,
        promoted_to: mv.promotion,
        ..TacticsRecord::default()
    };

    // Game over: nothing left to threaten.
    if record.is_checkmate {
        return record;
    }

    let before_board = before.board_snapshot();
    let after_board = after.board_snapshot();

    record.is_fork = detect_fork(&after_board, mv);
    record.is_double_attack = detect_double_attack(&after_board, mv);
    record.is_pin = detect_pin(&after_board, mv);
    record.is_skewer = detect_skewer(&after_board, mv);
    record.is_discovered_attack = detect_discovered_attack(&before_board, &after_board, mv);
    record.is_sacrifice = detect_sacrifice(mv);
    record.is_mating_threat = detect_mating_threat(before, after, mode);

    record
}

/// Enemy pieces the moved piece attacks from its destination.
fn attacked_enemies(board: &BoardSnapshot, mv: &MoveDescriptor) -> Vec<(Square, Piece)> {
    let Some(mover) = board.piece_at(mv.to) else {
        return Vec::new();
    };
    attacked_squares(board, mv.to, mover)
        .into_iter()
        .filter_map(|sq| board.piece_at(sq).map(|p| (sq, p)))
        .filter(|(_, p)| p.color != mover.color)
        .collect()
}

/// Two or more targets, each worth at least the attacker, or an undefended
/// piece of minor value or more. A king never forks.
pub fn detect_fork(board: &BoardSnapshot, mv: &MoveDescriptor) -> bool {
    let Some(mover) = board.piece_at(mv.to) else {
        return false;
    };
    if mover.role == Role::King {
        return false;
    }
    let own_value = material_value(mover.role);

    attacked_enemies(board, mv)
        .into_iter()
        .filter(|(sq, target)| {
            tactical_value(target.role) >= own_value
                || (material_value(target.role) >= MINOR_VALUE
                    && !is_square_attacked_by(board, *sq, target.color))
        })
        .count()
        >= 2
}

pub fn detect_double_attack(board: &BoardSnapshot, mv: &MoveDescriptor) -> bool {
    attacked_enemies(board, mv).len() >= 2
}

/// First and second enemy pieces on each line the moved slider looks along.
fn enemy_pairs(board: &BoardSnapshot, mv: &MoveDescriptor) -> Vec<(Piece, Piece)> {
    let Some(mover) = board.piece_at(mv.to) else {
        return Vec::new();
    };
    if !is_slider(mover.role) {
        return Vec::new();
    }

    ray_directions(mover.role)
        .iter()
        .filter_map(|&dir| match pieces_along(board, mv.to, dir, 2).as_slice() {
            [(_, front), (_, back)]
                if front.color != mover.color && back.color != mover.color =>
            {
                Some((*front, *back))
            }
            _ => None,
        })
        .collect()
}

/// The front piece shields a more valuable one behind it.
pub fn detect_pin(board: &BoardSnapshot, mv: &MoveDescriptor) -> bool {
    enemy_pairs(board, mv)
        .iter()
        .any(|(front, back)| tactical_value(back.role) > tactical_value(front.role))
}

/// The front piece is the more valuable; once it steps aside the back one falls.
pub fn detect_skewer(board: &BoardSnapshot, mv: &MoveDescriptor) -> bool {
    enemy_pairs(board, mv)
        .iter()
        .any(|(front, back)| tactical_value(front.role) > tactical_value(back.role))
}

/// A stationary friendly slider now sees through the vacated origin square
/// to an enemy piece it did not attack before.
pub fn detect_discovered_attack(
    before: &BoardSnapshot,
    after: &BoardSnapshot,
    mv: &MoveDescriptor,
) -> bool {
    let own = mv.color;

    after
        .pieces_of(own)
        .filter(|(sq, piece)| *sq != mv.to && is_slider(piece.role))
        .filter(|(sq, piece)| before.piece_at(*sq) == Some(*piece))
        .any(|(sq, piece)| {
            let previously = attacked_squares(before, sq, piece);
            ray_directions(piece.role).iter().any(|&dir| {
                let ray = cast_ray(after, sq, dir, FULL_RANGE);
                if !ray.contains(&mv.from) {
                    return false;
                }
                match ray.last() {
                    Some(&end) => matches!(
                        after.piece_at(end),
                        Some(target) if target.color != own && !previously.contains(end)
                    ),
                    None => false,
                }
            })
        })
}

/// A capture giving up at least a minor piece's worth for something cheaper.
pub fn detect_sacrifice(mv: &MoveDescriptor) -> bool {
    let Some(captured) = mv.captured else {
        return false;
    };
    let given = material_value(mv.piece);
    given > material_value(captured) && given >= 3
}

pub fn detect_mating_threat<E: RulesEngine>(before: &E, after: &E, mode: MatingThreatMode) -> bool {
    if !has_mate_in_one(after) {
        return false;
    }
    match mode {
        MatingThreatMode::Absolute => true,
        MatingThreatMode::NetNew => !flipped(before).map(|b| has_mate_in_one(&b)).unwrap_or(false),
    }
}

/// Whether the side to move can deliver checkmate immediately.
pub fn has_mate_in_one<E: RulesEngine>(engine: &E) -> bool {
    engine.has_mate_in_one()
}
