//! Piece values

use shakmaty::Role;

/// Material value in pawns. The king counts nothing towards material.
pub fn material_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

/// Value of a piece as a target: the king outranks everything.
pub fn tactical_value(role: Role) -> i32 {
    match role {
        Role::King => 100,
        other => material_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_only_matters_as_a_target() {
        assert_eq!(material_value(Role::King), 0);
        assert_eq!(tactical_value(Role::King), 100);
        assert_eq!(tactical_value(Role::Rook), material_value(Role::Rook));
    }
}
