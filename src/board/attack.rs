//! Attack requests and their results.
//!
//! An attack sends ships from an owned planet to any other planet. The
//! result descriptor carries everything a front end needs to animate it.

use serde::{Deserialize, Serialize};

use super::planet::{Coord, Side};

/// How the fight at the target planet ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    /// Ships joined a planet already owned by the attacker.
    Reinforced { garrison: u32 },
    /// The attacker took the planet with `garrison` ships left over.
    Captured { garrison: u32 },
    /// The defenders held with `garrison` ships left over.
    Repelled { garrison: u32 },
}

impl AttackOutcome {
    /// Short lowercase tag for text output.
    pub const fn tag(self) -> &'static str {
        match self {
            AttackOutcome::Reinforced { .. } => "reinforced",
            AttackOutcome::Captured { .. } => "captured",
            AttackOutcome::Repelled { .. } => "repelled",
        }
    }

    /// Ships on the target after the attack resolved.
    pub const fn garrison(self) -> u32 {
        match self {
            AttackOutcome::Reinforced { garrison }
            | AttackOutcome::Captured { garrison }
            | AttackOutcome::Repelled { garrison } => garrison,
        }
    }
}

/// Descriptor of an applied attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackResult {
    pub source: Coord,
    pub target: Coord,
    pub attacker: Side,
    pub ships: u32,
    pub outcome: AttackOutcome,
}

/// A rejected attack request. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("coordinate {0} is off the board")]
    OutOfBounds(Coord),
    #[error("planet {coord} is not owned by side {side}")]
    NotOwner { coord: Coord, side: Side },
    #[error("must send at least one ship")]
    NoShips,
    #[error("cannot send {requested} ships from a planet holding {available}; one must stay")]
    InsufficientShips { requested: u32, available: u32 },
    #[error("the game is over")]
    GameOver,
}
