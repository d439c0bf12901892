//! Tactics record types

use serde::Serialize;
use shakmaty::Role;

use crate::ser;

/// A tactical motif a move can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Motif {
    Fork,
    Pin,
    Skewer,
    DiscoveredAttack,
    DoubleAttack,
    Sacrifice,
    MatingThreat,
}

impl Motif {
    pub const ALL: [Motif; 7] = [
        Motif::Fork,
        Motif::Pin,
        Motif::Skewer,
        Motif::DiscoveredAttack,
        Motif::DoubleAttack,
        Motif::Sacrifice,
        Motif::MatingThreat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Motif::Fork => "fork",
            Motif::Pin => "pin",
            Motif::Skewer => "skewer",
            Motif::DiscoveredAttack => "discovered_attack",
            Motif::DoubleAttack => "double_attack",
            Motif::Sacrifice => "sacrifice",
            Motif::MatingThreat => "mating_threat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Motif::Fork => "Fork",
            Motif::Pin => "Pin",
            Motif::Skewer => "Skewer",
            Motif::DiscoveredAttack => "Discovered Attack",
            Motif::DoubleAttack => "Double Attack",
            Motif::Sacrifice => "Sacrifice",
            Motif::MatingThreat => "Mating Threat",
        }
    }
}

/// What a single move did, derived fresh from the positions around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TacticsRecord {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_capture: bool,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    pub is_fork: bool,
    pub is_pin: bool,
    pub is_skewer: bool,
    pub is_discovered_attack: bool,
    pub is_double_attack: bool,
    pub is_sacrifice: bool,
    pub is_mating_threat: bool,
    #[serde(serialize_with = "ser::opt_role")]
    pub captured_piece: Option<Role>,
    #[serde(serialize_with = "ser::opt_role")]
    pub promoted_to: Option<Role>,
}

impl TacticsRecord {
    pub fn has(&self, motif: Motif) -> bool {
        match motif {
            Motif::Fork => self.is_fork,
            Motif::Pin => self.is_pin,
            Motif::Skewer => self.is_skewer,
            Motif::DiscoveredAttack => self.is_discovered_attack,
            Motif::DoubleAttack => self.is_double_attack,
            Motif::Sacrifice => self.is_sacrifice,
            Motif::MatingThreat => self.is_mating_threat,
        }
    }

    /// Motifs present, in [`Motif::ALL`] order.
    pub fn motifs(&self) -> Vec<Motif> {
        Motif::ALL.into_iter().filter(|m| self.has(*m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motifs_follow_flags() {
        let record = TacticsRecord {
            is_pin: true,
            is_double_attack: true,
            ..TacticsRecord::default()
        };
        assert_eq!(record.motifs(), vec![Motif::Pin, Motif::DoubleAttack]);
        assert!(TacticsRecord::default().motifs().is_empty());
    }

    #[test]
    fn serializes_role_names() {
        let record = TacticsRecord {
            is_capture: true,
            captured_piece: Some(Role::Knight),
            ..TacticsRecord::default()
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["captured_piece"], "knight");
        assert_eq!(json["promoted_to"], serde_json::Value::Null);
        assert_eq!(Motif::DiscoveredAttack.as_str(), "discovered_attack");
    }
}
