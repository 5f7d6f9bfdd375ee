//! Distance ranking between planets.
//!
//! Planets never block movement, so the A* cost between two cells depends
//! only on the grid. All pairs are computed once with [`find_path`] and
//! reused by every lookup.

use std::sync::LazyLock;

use super::astar::find_path;
use crate::board::planet::{Coord, Planet, Side, CELL_COUNT};

/// Pre-computed A* cost between all cell pairs.
struct DistTable {
    cost: Box<[f64; CELL_COUNT * CELL_COUNT]>,
}

static DIST: LazyLock<DistTable> = LazyLock::new(build_dist_table);

fn build_dist_table() -> DistTable {
    let mut cost = Box::new([0.0f64; CELL_COUNT * CELL_COUNT]);
    for a in 0..CELL_COUNT {
        for b in 0..CELL_COUNT {
            cost[a * CELL_COUNT + b] = find_path(Coord::from_index(a), Coord::from_index(b)).cost;
        }
    }
    DistTable { cost }
}

/// A* path cost between two cells. Off-board coordinates are infinitely far.
#[inline]
pub fn cell_distance(a: Coord, b: Coord) -> f64 {
    match (a.index(), b.index()) {
        (Some(i), Some(j)) => DIST.cost[i * CELL_COUNT + j],
        _ => f64::INFINITY,
    }
}

/// A* path cost between two planets.
#[inline]
pub fn distance(a: &Planet, b: &Planet) -> f64 {
    cell_distance(a.coord(), b.coord())
}

/// Returns up to `k` candidates closest to `source`, nearest first, paired
/// with their distance. The source itself is skipped; equal distances keep
/// input order.
pub fn k_closest<'a, I>(source: &Planet, candidates: I, k: usize) -> Vec<(&'a Planet, f64)>
where
    I: IntoIterator<Item = &'a Planet>,
{
    let mut ranked: Vec<(&Planet, f64)> = candidates
        .into_iter()
        .filter(|p| p.coord() != source.coord())
        .map(|p| (p, distance(source, p)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(k);
    ranked
}

/// Priority-weighted distance from `source` to `target` for `side`. Lower
/// means a more attractive target.
///
/// Reinforcing an own planet or attacking an enemy at least as strong as the
/// source costs 1.5x. Neutral planets and weaker enemies are divided by
/// `size + 1`.
pub fn strategic_distance(source: &Planet, target: &Planet, side: Side) -> f64 {
    let base = distance(source, target);
    let cheap = base / (target.size() as f64 + 1.0);
    match target.owner() {
        Some(owner) if owner == side => base * 1.5,
        None => cheap,
        Some(_) if target.ships() < source.ships() => cheap,
        Some(_) => base * 1.5,
    }
}
