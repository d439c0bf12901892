//! Tactical pattern detection

mod classifier;
mod types;

pub use classifier::{
    classify_tactics, classify_tactics_with, detect_discovered_attack, detect_double_attack,
    detect_fork, detect_mating_threat, detect_pin, detect_sacrifice, detect_skewer,
    has_mate_in_one,
};
pub use types::{Motif, TacticsRecord};
