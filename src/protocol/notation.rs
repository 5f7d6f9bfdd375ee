//! Compact board notation.
//!
//! Encodes a full position on a single line, in the spirit of chess FEN.
//!
//! Format: `<turn><side>/<row0>/<row1>/<row2>/<row3>`
//!
//! Each row lists its four cells left to right, separated by commas. A cell
//! is `<owner><size>[:<ships>]` where owner is `a`, `b`, or `n` (neutral),
//! size is 1-3, and ships defaults to 0. Row index is `y`, cell index is `x`.
//!
//! Example (two starting garrisons on an all-size-2 board):
//! `0a/a2:10,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,b2:10`

use std::fmt::Write;

use crate::board::planet::{Coord, Side, BOARD_SIZE, CELL_COUNT};
use crate::board::state::BoardState;

/// Largest garrison a cell may declare. Above capacity is allowed so that
/// starting garrisons and capture survivors can be written down.
pub const MAX_NOTATED_SHIPS: u32 = 99;

/// Errors that can occur during notation parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected {expected} sections separated by '/', got {0}", expected = BOARD_SIZE + 1)]
    WrongSectionCount(usize),

    #[error("invalid header '{0}': expected <turn><a|b>")]
    InvalidHeader(String),

    #[error("row {row} has {count} cells, expected {expected}", expected = BOARD_SIZE)]
    WrongCellCount { row: usize, count: usize },

    #[error("invalid owner character: '{0}'")]
    InvalidOwner(char),

    #[error("invalid planet size in '{0}': expected 1, 2 or 3")]
    InvalidSize(String),

    #[error("invalid ship count in '{0}'")]
    InvalidShips(String),

    #[error("empty cell in row {0}")]
    EmptyCell(usize),
}

/// Encodes a board to notation. Zero garrisons are omitted.
pub fn encode_board(board: &BoardState) -> String {
    let mut out = String::with_capacity(8 + CELL_COUNT * 6);
    let _ = write!(out, "{}{}", board.turn, board.current_side.to_char());

    for (i, p) in board.planets().iter().enumerate() {
        if i % BOARD_SIZE == 0 {
            out.push('/');
        } else {
            out.push(',');
        }
        out.push(p.owner().map_or('n', Side::to_char));
        let _ = write!(out, "{}", p.size());
        if p.ships() > 0 {
            let _ = write!(out, ":{}", p.ships());
        }
    }
    out
}

/// Parses notation into a board. The terminal state is recomputed from the
/// parsed position.
pub fn parse_board(s: &str) -> Result<BoardState, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != BOARD_SIZE + 1 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }

    let (turn, side) = parse_header(sections[0])?;

    let mut sizes = [1u8; CELL_COUNT];
    let mut garrisons = [(None, 0u32); CELL_COUNT];
    for (y, row) in sections[1..].iter().enumerate() {
        let cells: Vec<&str> = row.split(',').collect();
        if cells.len() != BOARD_SIZE {
            return Err(NotationError::WrongCellCount { row: y, count: cells.len() });
        }
        for (x, cell) in cells.into_iter().enumerate() {
            let (owner, size, ships) = parse_cell(cell, y)?;
            let idx = y * BOARD_SIZE + x;
            sizes[idx] = size;
            garrisons[idx] = (owner, ships);
        }
    }

    let mut board = BoardState::with_sizes(sizes);
    for (idx, (owner, ships)) in garrisons.into_iter().enumerate() {
        board.place(Coord::from_index(idx), owner, ships);
    }
    board.turn = turn;
    board.current_side = side;
    board.check_game_over();
    Ok(board)
}

fn parse_header(s: &str) -> Result<(u32, Side), NotationError> {
    let invalid = || NotationError::InvalidHeader(s.to_string());
    let side_char = s.chars().last().ok_or_else(invalid)?;
    let side = Side::from_char(side_char).ok_or_else(invalid)?;
    let turn = s[..s.len() - side_char.len_utf8()]
        .parse::<u32>()
        .map_err(|_| invalid())?;
    Ok((turn, side))
}

fn parse_cell(cell: &str, row: usize) -> Result<(Option<Side>, u8, u32), NotationError> {
    let mut chars = cell.chars();
    let owner = match chars.next() {
        None => return Err(NotationError::EmptyCell(row)),
        Some('n') | Some('N') => None,
        Some(c) => Some(Side::from_char(c).ok_or(NotationError::InvalidOwner(c))?),
    };

    let rest = chars.as_str();
    let (size_str, ships_str) = match rest.split_once(':') {
        Some((size, ships)) => (size, Some(ships)),
        None => (rest, None),
    };

    let size = match size_str.parse::<u8>() {
        Ok(v @ 1..=3) => v,
        _ => return Err(NotationError::InvalidSize(cell.to_string())),
    };
    let ships = match ships_str {
        Some(v) => match v.parse::<u32>() {
            Ok(n) if n <= MAX_NOTATED_SHIPS => n,
            _ => return Err(NotationError::InvalidShips(cell.to_string())),
        },
        None => 0,
    };

    Ok((owner, size, ships))
}
