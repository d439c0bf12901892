//! Normalisation strategies, tried in order by the resolver
//!
//! Every strategy is a pure lookup: it rewrites the input and asks the rules
//! engine whether a legal move answers to it. None of them plays a move.

use serde::Serialize;
use shakmaty::{Color, Role};

use crate::board::{parse_square, role_from_letter};
use crate::rules::{MoveDescriptor, RulesEngine};

const KINGSIDE: [&str; 6] = ["00", "0-0", "OO", "O-O", "oo", "o-o"];
const QUEENSIDE: [&str; 6] = ["000", "0-0-0", "OOO", "O-O-O", "ooo", "o-o-o"];

const PROMOTION_LETTERS: [char; 4] = ['Q', 'R', 'N', 'B'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Castling,
    Verbatim,
    InsertCapture,
    RemoveCapture,
    Promotion,
    Fuzzy,
}

impl Strategy {
    /// Cascade order; the first strategy that finds a move wins.
    pub const ORDER: [Strategy; 6] = [
        Strategy::Castling,
        Strategy::Verbatim,
        Strategy::InsertCapture,
        Strategy::RemoveCapture,
        Strategy::Promotion,
        Strategy::Fuzzy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Castling => "castling",
            Strategy::Verbatim => "verbatim",
            Strategy::InsertCapture => "insert_capture",
            Strategy::RemoveCapture => "remove_capture",
            Strategy::Promotion => "promotion",
            Strategy::Fuzzy => "fuzzy",
        }
    }

    /// Looks up the move this strategy reads into `input`, already cleaned.
    pub fn attempt<E: RulesEngine>(self, input: &str, engine: &E) -> Option<MoveDescriptor> {
        match self {
            Strategy::Castling => castling(input, engine),
            Strategy::Verbatim => engine.find_move(input),
            Strategy::InsertCapture => insert_capture(input, engine),
            Strategy::RemoveCapture => remove_capture(input, engine),
            Strategy::Promotion => promotion(input, engine),
            Strategy::Fuzzy => fuzzy(input, &engine.legal_moves()),
        }
    }
}

/// Drops whitespace and the decorative `+ # ! ?` marks.
pub fn clean_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '+' | '#' | '!' | '?'))
        .collect()
}

fn castling<E: RulesEngine>(input: &str, engine: &E) -> Option<MoveDescriptor> {
    let label = if KINGSIDE.contains(&input) {
        "O-O"
    } else if QUEENSIDE.contains(&input) {
        "O-O-O"
    } else {
        return None;
    };
    engine.find_move(label)
}

/// Splits off a trailing destination square, e.g. `Nf3` -> (`N`, `f3`).
fn split_destination(input: &str) -> Option<(&str, &str)> {
    let cut = input.len().checked_sub(2)?;
    if !input.is_char_boundary(cut) {
        return None;
    }
    let (head, dest) = input.split_at(cut);
    parse_square(dest).map(|_| (head, dest))
}

fn insert_capture<E: RulesEngine>(input: &str, engine: &E) -> Option<MoveDescriptor> {
    if input.contains('x') {
        return None;
    }
    let (head, dest) = split_destination(input)?;
    if head.is_empty() {
        return None;
    }
    engine
        .find_move(&format!("{}x{}", head, dest))
        .filter(|m| m.flags.capture)
}

fn remove_capture<E: RulesEngine>(input: &str, engine: &E) -> Option<MoveDescriptor> {
    if !input.contains('x') {
        return None;
    }
    engine.find_move(&input.replacen('x', "", 1))
}

/// Input that ends on the mover's last rank and looks like a pawn move.
fn is_promotion_input(input: &str, side: Color) -> bool {
    let last_rank = match side {
        Color::White => '8',
        Color::Black => '1',
    };
    let starts_on_file = input.chars().next().is_some_and(|c| ('a'..='h').contains(&c));
    input.ends_with(last_rank) && (starts_on_file || input.len() <= 3)
}

fn promotion<E: RulesEngine>(input: &str, engine: &E) -> Option<MoveDescriptor> {
    if !is_promotion_input(input, engine.side_to_move()) {
        return None;
    }
    PROMOTION_LETTERS
        .iter()
        .flat_map(|&letter| {
            [
                format!("{}{}", input, letter),
                format!("{}={}", input, letter),
                format!("{}{}", input, letter.to_ascii_lowercase()),
            ]
        })
        .chain(std::iter::once(format!("{}=Q", input)))
        .find_map(|label| engine.find_move(&label))
}

/// Lower-case and keep only file letters, rank digits and `x`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='h' | '0'..='8' | 'x'))
        .collect()
}

/// Whether a move by `role` fits what the first character of `input` names.
///
/// A piece letter names that piece and a file letter names a pawn; a
/// lower-case `b` may be either the bishop or the b-file.
fn agrees_with_lead(input: &str, role: Role) -> bool {
    match input.chars().next() {
        Some('b') => matches!(role, Role::Pawn | Role::Bishop),
        Some(c) => match role_from_letter(c) {
            Some(named) => named == role,
            None if c.is_ascii_lowercase() && ('a'..='h').contains(&c) => role == Role::Pawn,
            None => true,
        },
        None => true,
    }
}

fn piece_letter(role: Role) -> Option<char> {
    match role {
        Role::King => Some('K'),
        Role::Queen => Some('Q'),
        Role::Rook => Some('R'),
        Role::Bishop => Some('B'),
        Role::Knight => Some('N'),
        Role::Pawn => None,
    }
}

/// Loose matching against every legal move, first hit in move-list order.
pub fn fuzzy(input: &str, legal: &[MoveDescriptor]) -> Option<MoveDescriptor> {
    let wanted = normalize(input);
    let lower = input.to_lowercase();
    let upper = input.to_uppercase();

    legal
        .iter()
        .find(|m| {
            let to = m.to.to_string();

            if !wanted.is_empty()
                && normalize(m.san_core()) == wanted
                && agrees_with_lead(input, m.piece)
            {
                return true;
            }

            if input.len() == 2 && m.piece == Role::Pawn && to == lower {
                return true;
            }

            if let Some(letter) = piece_letter(m.piece) {
                let plain = format!("{}{}", letter, to).to_uppercase();
                let capture = format!("{}x{}", letter, to).to_uppercase();
                if upper == plain || (m.flags.capture && upper == capture) {
                    return true;
                }
            }

            if m.piece == Role::Pawn && m.flags.capture {
                let file = m.from.file().char();
                if lower == format!("{}x{}", file, to) || lower == format!("{}{}", file, to) {
                    return true;
                }
            }

            false
        })
        .cloned()
}
