//! Position and attack evaluation.
//!
//! The fuzzy evaluator scores single attacks and sizes fleets. The static
//! heuristic scores whole positions for the search leaves.

pub mod fuzzy;
pub(crate) mod heuristic;

use crate::board::planet::{Coord, Side};
use crate::board::state::BoardState;

pub use fuzzy::{
    calculate_strategic_value, defuzzify, game_phase, planet_strength, round_number,
    strategic_value_terms, Activations, FuzzyEvaluator, ShipPolicy, Terms,
};
pub use heuristic::{evaluate, evaluate_all, EvalWeights, Material};

/// Aggressiveness of an attack between two cells with the default policy.
/// Returns `None` if either coordinate is off the board.
pub fn evaluate_attack(board: &BoardState, source: Coord, target: Coord, side: Side) -> Option<f64> {
    let src = board.planet_at(source)?;
    let dst = board.planet_at(target)?;
    Some(FuzzyEvaluator::default().evaluate_attack(board, src, dst, side))
}

/// Recommended ships for an attack between two cells with the default
/// policy. Returns 0 for off-board coordinates or when the attack should
/// be skipped.
pub fn recommend_ship_count(
    board: &BoardState,
    source: Coord,
    target: Coord,
    side: Side,
    aggressiveness: f64,
) -> u32 {
    match (board.planet_at(source), board.planet_at(target)) {
        (Some(src), Some(dst)) => {
            FuzzyEvaluator::default().recommend_ships(src, dst, side, aggressiveness)
        }
        _ => 0,
    }
}
