//! `serialize_with` helpers for shakmaty value types

use serde::{Serialize, Serializer};
use shakmaty::{Color, Piece, Role, Square};

use crate::board::{color_name, role_name};

#[derive(Serialize)]
struct PieceRepr {
    color: &'static str,
    role: &'static str,
}

pub fn square<S: Serializer>(square: &Square, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(square)
}

pub fn role<S: Serializer>(role: &Role, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(role_name(*role))
}

pub fn opt_role<S: Serializer>(role: &Option<Role>, s: S) -> Result<S::Ok, S::Error> {
    match role {
        Some(r) => s.serialize_str(role_name(*r)),
        None => s.serialize_none(),
    }
}

pub fn color<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(color_name(*color))
}

pub fn piece<S: Serializer>(piece: &Piece, s: S) -> Result<S::Ok, S::Error> {
    PieceRepr {
        color: color_name(piece.color),
        role: role_name(piece.role),
    }
    .serialize(s)
}
