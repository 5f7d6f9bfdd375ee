//! Fuzzy-logic attack scoring.
//!
//! Three inputs are fuzzified into overlapping linguistic terms:
//! - planet strength from `target.ships / source.ships` (weak/medium/strong)
//! - strategic value of the target (low/medium/high)
//! - game phase from the round number (early/mid/late)
//!
//! Nine fixed rules combine the terms (AND = min, OR = max) into low, medium,
//! and high aggressiveness activations, which are defuzzified by a weighted
//! centroid into a single score in [0, 1].

use serde::{Deserialize, Serialize};

use crate::board::planet::{Planet, Side};
use crate::board::state::BoardState;

/// Output term centers used by [`defuzzify`].
pub const LOW_CENTER: f64 = 0.25;
pub const MEDIUM_CENTER: f64 = 0.5;
pub const HIGH_CENTER: f64 = 0.85;

/// Score returned when no rule fires.
pub const NEUTRAL_AGGRESSIVENESS: f64 = 0.5;

/// Descending ramp: 1 at or below `lo`, 0 above `hi`.
#[inline]
fn falling(v: f64, lo: f64, hi: f64, width: f64) -> f64 {
    if v <= lo {
        1.0
    } else if v <= hi {
        (hi - v) / width
    } else {
        0.0
    }
}

/// Ascending ramp: 0 at or below `lo`, 1 above `hi`.
#[inline]
fn rising(v: f64, lo: f64, hi: f64, width: f64) -> f64 {
    if v <= lo {
        0.0
    } else if v <= hi {
        (v - lo) / width
    } else {
        1.0
    }
}

/// Triangle rising from `lo` to `mid` and falling from `mid` to `hi`.
#[inline]
fn triangle(v: f64, lo: f64, mid: f64, hi: f64, up: f64, down: f64) -> f64 {
    if v <= lo {
        0.0
    } else if v <= mid {
        (v - lo) / up
    } else if v <= hi {
        (hi - v) / down
    } else {
        0.0
    }
}

/// Membership degrees of one input across its three terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Fuzzifies `target.ships / source.ships` into weak/medium/strong.
pub fn planet_strength(ship_ratio: f64) -> Terms {
    Terms {
        low: falling(ship_ratio, 0.3, 0.6, 0.3),
        medium: triangle(ship_ratio, 0.3, 0.6, 0.9, 0.3, 0.3),
        high: rising(ship_ratio, 0.6, 0.9, 0.3),
    }
}

/// Fuzzifies a strategic value into low/medium/high.
pub fn strategic_value_terms(value: f64) -> Terms {
    Terms {
        low: falling(value, 2.0, 4.0, 2.0),
        medium: triangle(value, 2.0, 4.0, 6.0, 2.0, 2.0),
        high: rising(value, 4.0, 6.0, 2.0),
    }
}

/// Fuzzifies a round number into early/mid/late.
pub fn game_phase(round: u32) -> Terms {
    let r = round as f64;
    Terms {
        low: falling(r, 10.0, 20.0, 10.0),
        medium: triangle(r, 10.0, 20.0, 35.0, 10.0, 15.0),
        high: rising(r, 20.0, 35.0, 15.0),
    }
}

/// Converts rule activations to a crisp score by weighted centroid.
/// All-zero activations give [`NEUTRAL_AGGRESSIVENESS`].
pub fn defuzzify(low: f64, medium: f64, high: f64) -> f64 {
    let numerator = low * LOW_CENTER + medium * MEDIUM_CENTER + high * HIGH_CENTER;
    let denominator = low + medium + high;
    if denominator == 0.0 {
        return NEUTRAL_AGGRESSIVENESS;
    }
    numerator / denominator
}

/// Strategic worth of a planet: its size, +2 on the four center cells,
/// +1 elsewhere off the border, and -0.5 on the border (never below 1).
pub fn calculate_strategic_value(planet: &Planet) -> f64 {
    let c = planet.coord();
    let mut value = planet.size() as f64;
    if c.is_center() {
        value += 2.0;
    } else if c.is_interior() {
        value += 1.0;
    }
    if c.is_border() {
        value = (value - 0.5).max(1.0);
    }
    value
}

/// The round number shown to players: one round covers both sides' turns.
pub fn round_number(board: &BoardState) -> u32 {
    board.turn / 2 + 1
}

/// Force thresholds for turning aggressiveness into a ship count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPolicy {
    /// At or above this score, send `overwhelming_factor` times what is needed.
    pub overwhelming_threshold: f64,
    pub overwhelming_factor: f64,
    /// At or above this score, send `moderate_factor` times what is needed.
    pub moderate_threshold: f64,
    pub moderate_factor: f64,
}

impl Default for ShipPolicy {
    fn default() -> Self {
        ShipPolicy {
            overwhelming_threshold: 0.7,
            overwhelming_factor: 1.5,
            moderate_threshold: 0.4,
            moderate_factor: 1.2,
        }
    }
}

/// Rule activations for one candidate attack, kept for analysis output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Activations {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Scores candidate attacks and sizes the fleet to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzyEvaluator {
    pub policy: ShipPolicy,
}

impl FuzzyEvaluator {
    pub fn new(policy: ShipPolicy) -> Self {
        FuzzyEvaluator { policy }
    }

    /// Fires the rule base and returns the three output activations.
    pub fn activations(&self, board: &BoardState, source: &Planet, target: &Planet) -> Activations {
        let ship_ratio = if source.ships() == 0 {
            1.0
        } else {
            target.ships() as f64 / source.ships() as f64
        };
        let strength = planet_strength(ship_ratio);
        let value = strategic_value_terms(calculate_strategic_value(target));
        let phase = game_phase(round_number(board));

        let (weak, medium_strength, strong) = (strength.low, strength.medium, strength.high);
        let (low_value, medium_value, high_value) = (value.low, value.medium, value.high);
        let (early, mid, late) = (phase.low, phase.medium, phase.high);

        let mut low = strong;
        let mut high = weak.min(high_value);
        let mut medium = weak.min(low_value);
        medium = medium.max(medium_strength.min(high_value));
        low = low.max(medium_strength.min(low_value));
        high = high.max(early.min(weak));
        high = high.max(late.min(weak.min(high_value)));
        low = low.max(late.min(strong));
        medium = medium.max(mid.min(medium_value));

        Activations { low, medium, high }
    }

    /// Aggressiveness in [0, 1] for sending ships from `source` to `target`.
    ///
    /// The score depends only on the two planets and the turn; `side` is
    /// accepted so callers score from an explicit perspective.
    pub fn evaluate_attack(&self, board: &BoardState, source: &Planet, target: &Planet, _side: Side) -> f64 {
        let a = self.activations(board, source, target);
        defuzzify(a.low, a.medium, a.high)
    }

    /// Ships to send for the given aggressiveness, or 0 to skip.
    ///
    /// One ship always stays home. Reinforcements send a share of what is
    /// available. Attacks send a multiple of `target.ships + 1` that grows
    /// with aggressiveness; a low score only attacks when the minimum force
    /// leaves a margin.
    pub fn recommend_ships(&self, source: &Planet, target: &Planet, side: Side, aggressiveness: f64) -> u32 {
        let available = source.ships().saturating_sub(1);
        if available == 0 {
            return 0;
        }

        let ships = if target.is_owned_by(side) {
            (available as f64 * aggressiveness) as u32
        } else {
            let needed = target.ships() + 1;
            if aggressiveness >= self.policy.overwhelming_threshold {
                available.min((needed as f64 * self.policy.overwhelming_factor) as u32)
            } else if aggressiveness >= self.policy.moderate_threshold {
                available.min((needed as f64 * self.policy.moderate_factor) as u32)
            } else if needed < available {
                needed
            } else {
                return 0;
            }
        };

        ships.clamp(1, available)
    }
}
