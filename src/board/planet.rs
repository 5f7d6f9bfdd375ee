//! Planets, sides, and grid coordinates.
//!
//! A planet is a single grid cell: it has a fixed size that drives its
//! capacity, an optional owning side, and a garrison of ships.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of the square board.
pub const BOARD_SIZE: usize = 4;

/// The number of planets on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Ships of capacity per unit of planet size.
pub const SHIPS_PER_SIZE: u32 = 3;

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// Both sides in turn order.
pub const ALL_SIDES: [Side; 2] = [Side::A, Side::B];

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Returns the lowercase single-character abbreviation.
    pub const fn to_char(self) -> char {
        match self {
            Side::A => 'a',
            Side::B => 'b',
        }
    }

    /// Parses a side from its single-character abbreviation.
    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'a' | 'A' => Some(Side::A),
            'b' | 'B' => Some(Side::B),
            _ => None,
        }
    }

    /// Parses a side from a one-letter token such as `a` or `B`.
    pub fn from_name(s: &str) -> Option<Side> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Side::from_char(c),
            _ => None,
        }
    }

    /// Returns the array slot used for per-side tallies.
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A grid position. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Coord { x, y }
    }

    /// Returns true if the coordinate lies on the board.
    pub const fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Row-major index into the planet array, or `None` when off the board.
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * BOARD_SIZE + self.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Coord::index`]. `idx` must be below `CELL_COUNT`.
    pub const fn from_index(idx: usize) -> Self {
        Coord {
            x: (idx % BOARD_SIZE) as u8,
            y: (idx / BOARD_SIZE) as u8,
        }
    }

    /// One of the four innermost cells.
    pub const fn is_center(self) -> bool {
        let lo = (BOARD_SIZE / 2 - 1) as u8;
        let hi = (BOARD_SIZE / 2) as u8;
        self.x >= lo && self.x <= hi && self.y >= lo && self.y <= hi
    }

    /// Not on the outer ring.
    pub const fn is_interior(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        self.x > 0 && self.x < last && self.y > 0 && self.y < last
    }

    /// On the outer ring.
    pub const fn is_border(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        self.x == 0 || self.y == 0 || self.x == last || self.y == last
    }

    /// Iterates every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A planet on the board.
///
/// Position and size are fixed at creation. Owner and garrison change only
/// through the board's attack and generation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Planet {
    coord: Coord,
    size: u8,
    pub(crate) owner: Option<Side>,
    pub(crate) ships: u32,
}

impl Planet {
    /// Creates an unowned, empty planet. Sizes outside 1..=3 are clamped.
    pub fn new(coord: Coord, size: u8) -> Self {
        Planet {
            coord,
            size: size.clamp(1, 3),
            owner: None,
            ships: 0,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Owning side, `None` for neutral planets.
    pub fn owner(&self) -> Option<Side> {
        self.owner
    }

    pub fn ships(&self) -> u32 {
        self.ships
    }

    pub fn max_ships(&self) -> u32 {
        self.size as u32 * SHIPS_PER_SIZE
    }

    pub fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(&self, side: Side) -> bool {
        self.owner == Some(side)
    }

    /// Adds ships without exceeding capacity.
    pub(crate) fn add_ships(&mut self, count: u32) {
        self.ships = self.ships.saturating_add(count).min(self.max_ships());
    }

    /// Removes ships, bottoming out at zero.
    pub(crate) fn remove_ships(&mut self, count: u32) {
        self.ships = self.ships.saturating_sub(count);
    }

    /// Owned planets produce one ship per turn.
    pub(crate) fn generate_ships(&mut self) {
        if self.owner.is_some() {
            self.add_ships(1);
        }
    }
}
