//! Hints returned when no strategy could place a move

use serde::Serialize;
use shakmaty::Role;

use crate::board::role_from_letter;
use crate::rules::MoveDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Piece the input seemed to name, or `"Unknown"`.
    pub piece: String,
    pub valid_moves: Vec<String>,
    pub reason: String,
}

fn display_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "Pawn",
        Role::Knight => "Knight",
        Role::Bishop => "Bishop",
        Role::Rook => "Rook",
        Role::Queen => "Queen",
        Role::King => "King",
    }
}

fn movement_rule(role: Role) -> &'static str {
    match role {
        Role::Bishop => "Bishops only move diagonally",
        Role::Rook => "Rooks only move in straight lines, horizontally or vertically",
        Role::Knight => "Knights move in an L shape",
        Role::King => "The king only moves one square at a time",
        Role::Queen => "The queen moves diagonally or in straight lines and cannot jump",
        Role::Pawn => "Invalid move",
    }
}

/// Builds the hint for `input` from the legal moves of the current position.
pub fn suggest(
    input: &str,
    legal: &[MoveDescriptor],
    piece_limit: usize,
    generic_limit: usize,
) -> Suggestion {
    let named = input
        .chars()
        .next()
        .and_then(|c| role_from_letter(c).map(|role| (c.to_ascii_uppercase(), role)));

    match named {
        Some((letter, role)) => {
            let valid_moves: Vec<String> = legal
                .iter()
                .filter(|m| m.san.starts_with(letter))
                .take(piece_limit)
                .map(|m| m.san.clone())
                .collect();
            let name = display_name(role);
            let reason = if valid_moves.is_empty() {
                format!("{} cannot move right now", name)
            } else {
                movement_rule(role).to_string()
            };
            Suggestion {
                piece: name.to_string(),
                valid_moves,
                reason,
            }
        }
        None => Suggestion {
            piece: "Unknown".to_string(),
            valid_moves: legal
                .iter()
                .take(generic_limit)
                .map(|m| m.san.clone())
                .collect(),
            reason: "Notation not recognized".to_string(),
        },
    }
}
