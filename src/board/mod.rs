//! Board representation and game-state types.
//!
//! Contains the planet grid, sides, attack resolution, turn handling, and
//! the randomized starting position.

pub mod adjacency;
pub mod attack;
pub mod planet;
pub mod state;

use rand::rngs::SmallRng;
use rand::SeedableRng;

pub use adjacency::{euclidean, is_adjacent, neighbors};
pub use attack::{AttackOutcome, AttackResult, InvalidMove};
pub use planet::{Coord, Planet, Side, ALL_SIDES, BOARD_SIZE, CELL_COUNT, SHIPS_PER_SIZE};
pub use state::{BoardState, Outcome, DOMINATION_THRESHOLD, MAX_TURNS, START_A, START_B};

/// Creates a fresh randomized board. A seed makes the layout reproducible.
pub fn initialize_board(seed: Option<u64>) -> BoardState {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    };
    BoardState::random(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_boards_match() {
        assert_eq!(initialize_board(Some(3)), initialize_board(Some(3)));
    }

    #[test]
    fn unseeded_board_is_valid() {
        let board = initialize_board(None);
        assert_eq!(board.planet_count(Side::A), 2);
        assert_eq!(board.planet_count(Side::B), 2);
        assert!(!board.is_game_over());
    }
}
