//! Pathfinding and distance ranking.
//!
//! A* over the 8-connected planet grid, plus the distance-based target
//! ranking used by move generation.

pub mod astar;
pub mod ranking;

pub use astar::{find_path, heuristic, Path};
pub use ranking::{cell_distance, distance, k_closest, strategic_distance};
