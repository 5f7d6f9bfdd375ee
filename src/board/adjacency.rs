//! Grid adjacency.
//!
//! Every cell connects to its eight surrounding cells. The board does not
//! wrap, so edge and corner cells have fewer neighbors. Neighbor lists are
//! built once and shared.

use std::sync::LazyLock;

use super::planet::{Coord, BOARD_SIZE, CELL_COUNT};

/// Neighbor lists indexed by `Coord::index`, in (dx, dy) scan order.
static NEIGHBORS: LazyLock<Vec<Vec<Coord>>> = LazyLock::new(build_neighbors);

fn build_neighbors() -> Vec<Vec<Coord>> {
    let n = BOARD_SIZE as i32;
    (0..CELL_COUNT)
        .map(|idx| {
            let c = Coord::from_index(idx);
            let mut out = Vec::with_capacity(8);
            for dx in -1i32..=1 {
                for dy in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = c.x as i32 + dx;
                    let ny = c.y as i32 + dy;
                    if (0..n).contains(&nx) && (0..n).contains(&ny) {
                        out.push(Coord::new(nx as u8, ny as u8));
                    }
                }
            }
            out
        })
        .collect()
}

/// Returns the cells adjacent to `c`. Off-board coordinates have none.
pub fn neighbors(c: Coord) -> &'static [Coord] {
    match c.index() {
        Some(idx) => &NEIGHBORS[idx],
        None => &[],
    }
}

/// Returns true if `a` and `b` are distinct touching cells.
pub fn is_adjacent(a: Coord, b: Coord) -> bool {
    neighbors(a).contains(&b)
}

/// Euclidean distance between two cell centers.
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}
