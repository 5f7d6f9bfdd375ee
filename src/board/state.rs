//! Game state representation.
//!
//! Holds the complete snapshot of a game: every planet on the grid, the
//! turn counter, the side to move, and the terminal outcome once decided.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::attack::{AttackOutcome, AttackResult, InvalidMove};
use super::planet::{Coord, Planet, Side, CELL_COUNT};

/// Turn count at which the game ends on planet count.
pub const MAX_TURNS: u32 = 30;

/// Planet count that wins the game outright.
pub const DOMINATION_THRESHOLD: usize = 12;

/// Starting garrisons: (coordinate, ships) for each side.
pub const START_A: [(Coord, u32); 2] = [(Coord::new(0, 0), 10), (Coord::new(1, 0), 8)];
pub const START_B: [(Coord, u32); 2] = [(Coord::new(3, 3), 10), (Coord::new(2, 3), 8)];

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Side),
    Tie,
}

impl Outcome {
    /// Returns `a`, `b`, or `tie`.
    pub fn tag(self) -> &'static str {
        match self {
            Outcome::Winner(Side::A) => "a",
            Outcome::Winner(Side::B) => "b",
            Outcome::Tie => "tie",
        }
    }
}

/// Complete board state at a point in time.
///
/// Planets live in a fixed-size row-major array, so `clone()` is a full,
/// allocation-free deep copy that shares nothing with the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    planets: [Planet; CELL_COUNT],
    pub turn: u32,
    pub current_side: Side,
    outcome: Option<Outcome>,
}

impl BoardState {
    /// Creates a board of neutral, empty planets with the given sizes
    /// (row-major). Side A moves first at turn 0.
    pub fn with_sizes(sizes: [u8; CELL_COUNT]) -> Self {
        let planets = std::array::from_fn(|i| Planet::new(Coord::from_index(i), sizes[i]));
        BoardState {
            planets,
            turn: 0,
            current_side: Side::A,
            outcome: None,
        }
    }

    /// Creates a board where every planet has the same size.
    pub fn uniform(size: u8) -> Self {
        Self::with_sizes([size; CELL_COUNT])
    }

    /// Creates a randomized starting board: each size drawn uniformly from
    /// 1..=3, with both sides' starting garrisons in opposite corners.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut sizes = [1u8; CELL_COUNT];
        for s in sizes.iter_mut() {
            *s = rng.gen_range(1..=3);
        }
        let mut board = Self::with_sizes(sizes);
        for (coord, ships) in START_A {
            board.place(coord, Some(Side::A), ships);
        }
        for (coord, ships) in START_B {
            board.place(coord, Some(Side::B), ships);
        }
        board
    }

    /// Sets owner and garrison of a planet directly. Used for setup; ignores
    /// capacity. Returns false if the coordinate is off the board.
    pub fn place(&mut self, coord: Coord, owner: Option<Side>, ships: u32) -> bool {
        match coord.index() {
            Some(idx) => {
                self.planets[idx].owner = owner;
                self.planets[idx].ships = ships;
                true
            }
            None => false,
        }
    }

    /// Returns the planet at `coord`, or `None` when off the board.
    pub fn planet_at(&self, coord: Coord) -> Option<&Planet> {
        coord.index().map(|idx| &self.planets[idx])
    }

    /// All planets in row-major order.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_owned_by(&self, side: Side) -> impl Iterator<Item = &Planet> + '_ {
        self.planets.iter().filter(move |p| p.owner == Some(side))
    }

    pub fn planet_count(&self, side: Side) -> usize {
        self.planets_owned_by(side).count()
    }

    pub fn neutral_count(&self) -> usize {
        self.planets.iter().filter(|p| p.owner.is_none()).count()
    }

    pub fn total_ships(&self, side: Side) -> u64 {
        self.planets_owned_by(side).map(|p| u64::from(p.ships)).sum()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The terminal outcome, once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Every owned planet gains one ship, capped at capacity.
    pub fn generate_ships(&mut self) {
        for p in self.planets.iter_mut() {
            p.generate_ships();
        }
    }

    /// Validates and applies an attack by the side to move.
    ///
    /// Requires the source to belong to `current_side` and
    /// `1 <= count < source.ships`. On any error the board is unchanged.
    pub fn apply_attack(
        &mut self,
        source: Coord,
        target: Coord,
        count: u32,
    ) -> Result<AttackResult, InvalidMove> {
        if self.is_game_over() {
            return Err(InvalidMove::GameOver);
        }
        let src_idx = source.index().ok_or(InvalidMove::OutOfBounds(source))?;
        if target.index().is_none() {
            return Err(InvalidMove::OutOfBounds(target));
        }
        let src = &self.planets[src_idx];
        if src.owner != Some(self.current_side) {
            return Err(InvalidMove::NotOwner {
                coord: source,
                side: self.current_side,
            });
        }
        if count == 0 {
            return Err(InvalidMove::NoShips);
        }
        if count >= src.ships {
            return Err(InvalidMove::InsufficientShips {
                requested: count,
                available: src.ships,
            });
        }
        Ok(self.resolve_attack(source, target, count))
    }

    /// Applies an attack without validation. The attacker is the source
    /// planet's owner. Both coordinates must be on the board and the source
    /// must be owned.
    pub(crate) fn resolve_attack(&mut self, source: Coord, target: Coord, count: u32) -> AttackResult {
        debug_assert!(source.in_bounds() && target.in_bounds());
        let src_idx = source.index().unwrap_or_default();
        let dst_idx = target.index().unwrap_or_default();

        let attacker = self.planets[src_idx].owner.unwrap_or(self.current_side);
        self.planets[src_idx].remove_ships(count);

        let dst = &mut self.planets[dst_idx];
        let outcome = if dst.owner == Some(attacker) {
            dst.add_ships(count);
            AttackOutcome::Reinforced { garrison: dst.ships }
        } else if count > dst.ships {
            dst.owner = Some(attacker);
            dst.ships = count - dst.ships;
            AttackOutcome::Captured { garrison: dst.ships }
        } else {
            dst.remove_ships(count);
            AttackOutcome::Repelled { garrison: dst.ships }
        };

        AttackResult {
            source,
            target,
            attacker,
            ships: count,
            outcome,
        }
    }

    /// Ends the current side's turn: generates ships, advances the turn
    /// counter, passes the move, and checks for a finished game.
    pub fn end_turn(&mut self) {
        if self.is_game_over() {
            tracing::debug!(turn = self.turn, "end_turn ignored: game already over");
            return;
        }
        self.generate_ships();
        self.turn += 1;
        self.current_side = self.current_side.opponent();
        self.check_game_over();
    }

    /// Recomputes the terminal outcome from the current position.
    pub fn check_game_over(&mut self) {
        self.outcome = self.decisive_outcome().or_else(|| self.turn_limit_outcome());
        if let Some(outcome) = self.outcome {
            tracing::debug!(turn = self.turn, outcome = outcome.tag(), "game over");
        }
    }

    /// Outcome from elimination or domination alone, ignoring the turn limit.
    ///
    /// Priority: an eliminated side loses first, then a dominating side wins.
    pub fn decisive_outcome(&self) -> Option<Outcome> {
        let a = self.planet_count(Side::A);
        let b = self.planet_count(Side::B);
        if a == 0 {
            Some(Outcome::Winner(Side::B))
        } else if b == 0 {
            Some(Outcome::Winner(Side::A))
        } else if a >= DOMINATION_THRESHOLD {
            Some(Outcome::Winner(Side::A))
        } else if b >= DOMINATION_THRESHOLD {
            Some(Outcome::Winner(Side::B))
        } else {
            None
        }
    }

    fn turn_limit_outcome(&self) -> Option<Outcome> {
        if self.turn < MAX_TURNS {
            return None;
        }
        let a = self.planet_count(Side::A);
        let b = self.planet_count(Side::B);
        Some(match a.cmp(&b) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::A),
            std::cmp::Ordering::Less => Outcome::Winner(Side::B),
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_board() -> impl Strategy<Value = BoardState> {
        let cell = (1u8..=3, 0u8..3, 0u32..12);
        (prop::collection::vec(cell, CELL_COUNT), any::<bool>()).prop_map(|(cells, b_moves)| {
            let mut sizes = [1u8; CELL_COUNT];
            for (i, (size, _, _)) in cells.iter().enumerate() {
                sizes[i] = *size;
            }
            let mut board = BoardState::with_sizes(sizes);
            for (i, (_, owner, ships)) in cells.into_iter().enumerate() {
                let owner = match owner {
                    0 => None,
                    1 => Some(Side::A),
                    _ => Some(Side::B),
                };
                let ships = if owner.is_none() { 0 } else { ships };
                board.place(Coord::from_index(i), owner, ships);
            }
            if b_moves {
                board.current_side = Side::B;
            }
            board
        })
    }

    proptest! {
        #[test]
        fn attack_laws(board in arbitrary_board(), src in 0usize..CELL_COUNT, dst in 0usize..CELL_COUNT, count in 0u32..14) {
            let source = Coord::from_index(src);
            let target = Coord::from_index(dst);
            prop_assume!(source != target);
            let mut after = board.clone();
            let before_src = *board.planet_at(source).unwrap();
            let before_dst = *board.planet_at(target).unwrap();

            match after.apply_attack(source, target, count) {
                Err(_) => prop_assert_eq!(&after, &board),
                Ok(res) => {
                    prop_assert_eq!(before_src.owner(), Some(board.current_side));
                    prop_assert!(count >= 1 && count < before_src.ships());
                    prop_assert_eq!(after.planet_at(source).unwrap().ships(), before_src.ships() - count);
                    let dst_now = after.planet_at(target).unwrap();
                    if before_dst.owner() == before_src.owner() {
                        prop_assert_eq!(dst_now.ships(), (before_dst.ships() + count).min(before_dst.max_ships()));
                    } else if count > before_dst.ships() {
                        prop_assert_eq!(dst_now.owner(), before_src.owner());
                        prop_assert_eq!(dst_now.ships(), count - before_dst.ships());
                    } else {
                        prop_assert_eq!(dst_now.owner(), before_dst.owner());
                        prop_assert_eq!(dst_now.ships(), before_dst.ships() - count);
                    }
                    prop_assert_eq!(res.outcome.garrison(), dst_now.ships());
                }
            }
        }

        #[test]
        fn invalid_requests_never_mutate(board in arbitrary_board(), src in 0usize..CELL_COUNT, dst in 0usize..CELL_COUNT) {
            let source = Coord::from_index(src);
            let ships = board.planet_at(source).unwrap().ships();
            let mut after = board.clone();
            prop_assert!(after.apply_attack(source, Coord::from_index(dst), ships).is_err());
            prop_assert_eq!(&after, &board);
        }

        #[test]
        fn capacity_holds_at_turn_boundaries(board in arbitrary_board()) {
            let mut board = board;
            board.end_turn();
            for p in board.planets() {
                if p.owner().is_some() {
                    prop_assert!(p.ships() <= p.max_ships());
                }
            }
        }
    }
}
