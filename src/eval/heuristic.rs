//! Static position evaluation.
//!
//! Scores a board from one side's perspective using material features:
//! planet count, ships, production (summed planet sizes), center control,
//! and open neutral planets. Decided positions short-circuit to
//! `±win_score`.
//!
//! All tallies are taken in one pass over the fixed planet array with
//! per-side accumulators indexed by `Side::index`.

use serde::{Deserialize, Serialize};

use crate::board::planet::{Side, ALL_SIDES};
use crate::board::state::{BoardState, DOMINATION_THRESHOLD};

/// Feature weights for [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per planet owned.
    pub planet: f64,
    /// Per ship in garrison.
    pub ship: f64,
    /// Per unit of owned planet size.
    pub production: f64,
    /// Per owned center cell.
    pub center: f64,
    /// Per neutral planet still on the board.
    pub neutral: f64,
    /// Magnitude returned for decided positions.
    pub win_score: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            planet: 100.0,
            ship: 10.0,
            production: 50.0,
            center: 30.0,
            neutral: 5.0,
            win_score: 10000.0,
        }
    }
}

/// Per-side material tallies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub planets: [u32; 2],
    pub ships: [u64; 2],
    pub production: [u32; 2],
    pub centers: [u32; 2],
    pub neutral: u32,
}

impl Material {
    /// Tallies every planet on the board.
    pub fn of(board: &BoardState) -> Self {
        let mut m = Material::default();
        for p in board.planets() {
            match p.owner() {
                Some(side) => {
                    let i = side.index();
                    m.planets[i] += 1;
                    m.ships[i] += u64::from(p.ships());
                    m.production[i] += p.size() as u32;
                    if p.coord().is_center() {
                        m.centers[i] += 1;
                    }
                }
                None => m.neutral += 1,
            }
        }
        m
    }
}

/// Evaluates `board` from `side`'s perspective. Higher is better for `side`.
///
/// Terminal checks come first, in order: `side` has no planets (loss), the
/// opponent has none (win), `side` dominates (win), the opponent dominates
/// (loss). Otherwise the score is a weighted sum of material differences
/// plus a bonus per neutral planet.
pub fn evaluate(side: Side, board: &BoardState, weights: &EvalWeights) -> f64 {
    let m = Material::of(board);
    let me = side.index();
    let them = side.opponent().index();
    let threshold = DOMINATION_THRESHOLD as u32;

    if m.planets[me] == 0 {
        return -weights.win_score;
    }
    if m.planets[them] == 0 || m.planets[me] >= threshold {
        return weights.win_score;
    }
    if m.planets[them] >= threshold {
        return -weights.win_score;
    }

    let diff = |v: [u32; 2]| v[me] as f64 - v[them] as f64;

    let mut score = 0.0;
    score += diff(m.planets) * weights.planet;
    score += (m.ships[me] as f64 - m.ships[them] as f64) * weights.ship;
    score += diff(m.production) * weights.production;
    score += diff(m.centers) * weights.center;
    score += m.neutral as f64 * weights.neutral;
    score
}

/// Evaluates the board for both sides. Returns scores indexed by `Side::index`.
pub fn evaluate_all(board: &BoardState, weights: &EvalWeights) -> [f64; 2] {
    let mut scores = [0.0; 2];
    for side in ALL_SIDES {
        scores[side.index()] = evaluate(side, board, weights);
    }
    scores
}
