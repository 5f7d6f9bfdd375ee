//! Driver protocol handling.
//!
//! Parsing for the line-oriented command protocol spoken by the `graviton`
//! binary, and the compact board notation used by `position`, `board`, and
//! self-play records.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command, EngineOption, GoParams};
