//! Candidate move generation.
//!
//! For each planet a side owns with ships to spare, ranks the nearest
//! targets by A* distance, scores each with the fuzzy evaluator, and keeps
//! the attacks the evaluator is willing to send ships on. The result is the
//! ordered candidate list the search iterates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::planet::{Coord, Side};
use crate::board::state::BoardState;
use crate::eval::FuzzyEvaluator;
use crate::path::k_closest;

/// Nearest targets considered per source planet.
pub const DEFAULT_MAX_TARGETS: usize = 8;

/// A scored attack the search may play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub source: Coord,
    pub target: Coord,
    pub ships: u32,
    pub aggressiveness: f64,
}

/// Generates ranked candidate attacks for `side`.
///
/// Sources are visited in row-major order and targets nearest first, so the
/// stable descending sort on aggressiveness leaves equal scores in that
/// order. Candidates with a zero ship recommendation are dropped. An empty
/// list means `side` has no move.
pub fn candidate_moves(
    board: &BoardState,
    side: Side,
    evaluator: &FuzzyEvaluator,
    max_targets: usize,
) -> Vec<Candidate> {
    let mut moves = Vec::new();

    for source in board.planets_owned_by(side) {
        if source.ships() <= 1 {
            continue;
        }
        for (target, _) in k_closest(source, board.planets(), max_targets) {
            let aggressiveness = evaluator.evaluate_attack(board, source, target, side);
            let ships = evaluator.recommend_ships(source, target, side, aggressiveness);
            if ships > 0 {
                moves.push(Candidate {
                    source: source.coord(),
                    target: target.coord(),
                    ships,
                    aggressiveness,
                });
            }
        }
    }

    moves.sort_by(|a, b| b.aggressiveness.total_cmp(&a.aggressiveness));
    moves
}

/// Picks a uniformly random legal attack for `side`: a random source with
/// ships to spare, a random other cell, and a random count that leaves at
/// least one ship home. Returns `None` when no source can attack.
pub fn random_move(board: &BoardState, side: Side, rng: &mut impl Rng) -> Option<Candidate> {
    let sources: Vec<_> = board.planets_owned_by(side).filter(|p| p.ships() > 1).collect();
    if sources.is_empty() {
        return None;
    }
    let source = sources[rng.gen_range(0..sources.len())];

    let targets: Vec<Coord> = Coord::all().filter(|&c| c != source.coord()).collect();
    let target = targets[rng.gen_range(0..targets.len())];
    let ships = rng.gen_range(1..source.ships());

    Some(Candidate {
        source: source.coord(),
        target,
        ships,
        aggressiveness: 0.0,
    })
}
