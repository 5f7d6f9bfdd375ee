//! Alpha-beta minimax.
//!
//! The searching side maximizes and its opponent minimizes, one ply each.
//! A ply clones the board, resolves one candidate attack on the clone, and
//! hands the move to the other side; ships are not generated and the turn
//! counter does not advance inside the tree. Leaves are scored by the
//! static evaluator from the searching side's perspective.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{Difficulty, SearchConfig};
use crate::board::planet::{Coord, Side};
use crate::board::state::BoardState;
use crate::eval::{evaluate, FuzzyEvaluator};
use crate::movegen::{candidate_moves, Candidate};

/// The move chosen at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestMove {
    pub source: Coord,
    pub target: Coord,
    pub ships: u32,
}

impl From<Candidate> for BestMove {
    fn from(c: Candidate) -> Self {
        BestMove {
            source: c.source,
            target: c.target,
            ships: c.ships,
        }
    }
}

/// Outcome of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` when the searching side has no candidate or the root is terminal.
    pub best: Option<BestMove>,
    pub score: f64,
    pub depth: u32,
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed_ms: u64,
}

/// One search from a fixed perspective. Holds the counters for a run.
pub struct Searcher {
    side: Side,
    config: SearchConfig,
    evaluator: FuzzyEvaluator,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    pub fn new(side: Side, config: SearchConfig) -> Self {
        Searcher {
            side,
            config,
            evaluator: FuzzyEvaluator::new(config.policy),
            nodes: 0,
            cutoffs: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    fn is_terminal(board: &BoardState) -> bool {
        board.is_game_over() || board.decisive_outcome().is_some()
    }

    /// Scores `board` to `depth` plies. Returns the score and the move that
    /// achieved it at this node.
    pub fn minimax(
        &mut self,
        board: &BoardState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<Candidate>) {
        self.nodes += 1;

        if depth == 0 || Self::is_terminal(board) {
            return (evaluate(self.side, board, &self.config.weights), None);
        }

        let acting = if maximizing { self.side } else { self.side.opponent() };
        let moves = candidate_moves(board, acting, &self.evaluator, self.config.max_targets);
        if moves.is_empty() {
            return (evaluate(self.side, board, &self.config.weights), None);
        }

        let mut best_move = None;

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for m in moves {
                let child = play(board, &m);
                let (mut score, _) = self.minimax(&child, depth - 1, alpha, beta, false);
                score += m.aggressiveness * self.config.aggression_bonus;

                if score > best {
                    best = score;
                    best_move = Some(m);
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = f64::INFINITY;
            for m in moves {
                let child = play(board, &m);
                let (score, _) = self.minimax(&child, depth - 1, alpha, beta, true);

                if score < best {
                    best = score;
                    best_move = Some(m);
                }
                beta = beta.min(score);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            (best, best_move)
        }
    }
}

/// Applies a candidate to a fresh copy of `board` and passes the move.
fn play(board: &BoardState, m: &Candidate) -> BoardState {
    let mut child = board.clone();
    let result = child.resolve_attack(m.source, m.target, m.ships);
    child.current_side = result.attacker.opponent();
    child
}

/// Searches `board` for `side` with the given configuration.
pub fn search(board: &BoardState, side: Side, config: &SearchConfig) -> SearchResult {
    let start = Instant::now();
    let depth = config.difficulty.depth();
    let mut searcher = Searcher::new(side, *config);

    let (score, best) = searcher.minimax(board, depth, f64::NEG_INFINITY, f64::INFINITY, true);

    let result = SearchResult {
        best: best.map(BestMove::from),
        score,
        depth,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    tracing::debug!(
        side = %side,
        difficulty = %config.difficulty,
        score = result.score,
        nodes = result.nodes,
        cutoffs = result.cutoffs,
        elapsed_ms = result.elapsed_ms,
        "search complete"
    );
    if let Some(best) = best {
        tracing::trace!(
            source = %best.source,
            target = %best.target,
            ships = best.ships,
            aggressiveness = best.aggressiveness,
            "best root move"
        );
    }
    result
}

/// Best move for `side` at `difficulty` with default weights, or `None`
/// if `side` has nothing to play.
pub fn get_best_move(board: &BoardState, side: Side, difficulty: Difficulty) -> Option<BestMove> {
    search(board, side, &SearchConfig::new(difficulty)).best
}
