//! A* shortest paths over the planet grid.
//!
//! Step cost is the Euclidean distance between adjacent cells (1 straight,
//! sqrt(2) diagonal). The heuristic is Manhattan distance. The open set is a
//! binary heap ordered by `f = g + h`, ties broken by insertion order, with
//! a closed set so no cell is expanded twice.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::board::adjacency::{euclidean, neighbors};
use crate::board::planet::{Coord, CELL_COUNT};

/// A path between two cells and its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub cells: Vec<Coord>,
    pub cost: f64,
}

impl Path {
    /// The result when no route exists.
    pub fn unreachable() -> Self {
        Path {
            cells: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Manhattan distance between two cells.
pub fn heuristic(a: Coord, b: Coord) -> f64 {
    (a.x.abs_diff(b.x) as u32 + a.y.abs_diff(b.y) as u32) as f64
}

/// Open-set entry. Ordered so that `BinaryHeap` pops the lowest `f`, and
/// among equal `f` the earliest pushed.
struct OpenNode {
    f: f64,
    seq: u64,
    g: f64,
    cell: Coord,
    parent: Option<Coord>,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Finds the cheapest path from `start` to `goal`.
///
/// `start == goal` yields a one-cell path of cost 0. Off-board endpoints
/// yield [`Path::unreachable`].
pub fn find_path(start: Coord, goal: Coord) -> Path {
    let (Some(_), Some(_)) = (start.index(), goal.index()) else {
        return Path::unreachable();
    };
    if start == goal {
        return Path {
            cells: vec![start],
            cost: 0.0,
        };
    }

    let mut closed = [false; CELL_COUNT];
    let mut came_from: [Option<Coord>; CELL_COUNT] = [None; CELL_COUNT];
    let mut open = BinaryHeap::with_capacity(CELL_COUNT * 4);
    let mut seq = 0u64;

    open.push(OpenNode {
        f: heuristic(start, goal),
        seq,
        g: 0.0,
        cell: start,
        parent: None,
    });

    while let Some(node) = open.pop() {
        let Some(idx) = node.cell.index() else {
            continue;
        };
        if closed[idx] {
            continue;
        }
        closed[idx] = true;
        came_from[idx] = node.parent;

        if node.cell == goal {
            return Path {
                cells: reconstruct(&came_from, goal),
                cost: node.g,
            };
        }

        for &next in neighbors(node.cell) {
            if next.index().is_some_and(|i| closed[i]) {
                continue;
            }
            let g = node.g + euclidean(node.cell, next);
            seq += 1;
            open.push(OpenNode {
                f: g + heuristic(next, goal),
                seq,
                g,
                cell: next,
                parent: Some(node.cell),
            });
        }
    }

    Path::unreachable()
}

/// Walks parent links back from `goal` and returns the path start-first.
fn reconstruct(came_from: &[Option<Coord>; CELL_COUNT], goal: Coord) -> Vec<Coord> {
    let mut cells = vec![goal];
    let mut cur = goal;
    while let Some(prev) = cur.index().and_then(|i| came_from[i]) {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    cells
}
