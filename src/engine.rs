//! Engine state management.
//!
//! Holds the live board, the default difficulty, and the RNG for unseeded games,
//! and executes parsed protocol commands against them. Every handler writes
//! its response lines to the supplied writer and flushes.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::planet::{Coord, Side};
use crate::board::state::BoardState;
use crate::board::initialize_board;
use crate::eval::{calculate_strategic_value, FuzzyEvaluator};
use crate::path::strategic_distance;
use crate::protocol::notation::{encode_board, parse_board};
use crate::protocol::parser::{Command, EngineOption, GoParams};
use crate::search::{search, Difficulty, SearchConfig};

/// Whether the main loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<BoardState>,
    pub difficulty: Difficulty,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no position and default difficulty.
    pub fn new() -> Self {
        Engine {
            position: None,
            difficulty: Difficulty::default(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Executes one command.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::IsReady => self.handle_isready(out)?,
            Command::SetOption { option, value } => self.handle_setoption(option, &value, out)?,
            Command::NewGame { seed } => self.handle_newgame(seed, out)?,
            Command::Position { notation } => self.handle_position(&notation, out)?,
            Command::Board => self.handle_board(out)?,
            Command::Attack { source, target, ships } => {
                self.handle_attack(source, target, ships, out)?
            }
            Command::EndTurn => self.handle_endturn(out)?,
            Command::Analyze { source, target, side } => {
                self.handle_analyze(source, target, side, out)?
            }
            Command::Go(params) => self.handle_go(params, out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `setoption`. An invalid value is rejected and leaves the
    /// engine unchanged.
    pub fn handle_setoption<W: Write>(
        &mut self,
        option: EngineOption,
        value: &str,
        out: &mut W,
    ) -> io::Result<()> {
        match option {
            EngineOption::Difficulty => match value.parse::<Difficulty>() {
                Ok(d) => self.difficulty = d,
                Err(e) => return self.reject(&e.to_string(), out),
            },
            EngineOption::Seed => match value.parse::<u64>() {
                Ok(seed) => self.rng = SmallRng::seed_from_u64(seed),
                Err(_) => return self.reject(&format!("bad seed '{value}'"), out),
            },
        }
        tracing::debug!(?option, value, "option set");
        Ok(())
    }

    /// Starts a randomized game and prints its position.
    pub fn handle_newgame<W: Write>(&mut self, seed: Option<u64>, out: &mut W) -> io::Result<()> {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        let board = initialize_board(Some(seed));
        tracing::info!(seed, "new game");
        writeln!(out, "position {}", encode_board(&board))?;
        self.position = Some(board);
        out.flush()
    }

    /// Replaces the live board from notation.
    pub fn handle_position<W: Write>(&mut self, notation: &str, out: &mut W) -> io::Result<()> {
        match parse_board(notation) {
            Ok(board) => {
                self.position = Some(board);
                Ok(())
            }
            Err(e) => self.reject(&format!("bad position: {e}"), out),
        }
    }

    /// Prints the live board.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(board) = &self.position else {
            return self.reject("no position set", out);
        };
        writeln!(out, "position {}", encode_board(board))?;
        out.flush()
    }

    /// Applies an attack for the side to move.
    pub fn handle_attack<W: Write>(
        &mut self,
        source: Coord,
        target: Coord,
        ships: u32,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(board) = self.position.as_mut() else {
            return self.reject("no position set", out);
        };
        match board.apply_attack(source, target, ships) {
            Ok(res) => {
                writeln!(
                    out,
                    "attacked {} {} {} {} {}",
                    res.source,
                    res.target,
                    res.attacker,
                    res.outcome.tag(),
                    res.outcome.garrison()
                )?;
                out.flush()
            }
            Err(e) => self.reject(&e.to_string(), out),
        }
    }

    /// Ends the current turn and reports the new turn and any result.
    pub fn handle_endturn<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(board) = self.position.as_mut() else {
            return self.reject("no position set", out);
        };
        board.end_turn();
        writeln!(out, "turn {} side {}", board.turn, board.current_side)?;
        if let Some(outcome) = board.outcome() {
            writeln!(out, "gameover {}", outcome.tag())?;
        }
        out.flush()
    }

    /// Prints the fuzzy breakdown of one attack.
    pub fn handle_analyze<W: Write>(
        &self,
        source: Coord,
        target: Coord,
        side: Option<Side>,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(board) = &self.position else {
            return self.reject("no position set", out);
        };
        let (Some(src), Some(dst)) = (board.planet_at(source), board.planet_at(target)) else {
            return self.reject("coordinate off the board", out);
        };
        let side = side.unwrap_or(board.current_side);
        let fuzzy = FuzzyEvaluator::default();
        let act = fuzzy.activations(board, src, dst);
        let aggressiveness = fuzzy.evaluate_attack(board, src, dst, side);
        let ships = fuzzy.recommend_ships(src, dst, side, aggressiveness);

        writeln!(
            out,
            "analysis {} {} side {} value {} low {:.4} medium {:.4} high {:.4} aggressiveness {:.4} ships {} distance {:.4}",
            source,
            target,
            side,
            calculate_strategic_value(dst),
            act.low,
            act.medium,
            act.high,
            aggressiveness,
            ships,
            strategic_distance(src, dst, side)
        )?;
        out.flush()
    }

    /// Searches the live board and prints `bestmove`. The board is not
    /// changed.
    pub fn handle_go<W: Write>(&self, params: GoParams, out: &mut W) -> io::Result<()> {
        let Some(board) = &self.position else {
            return self.reject("no position set", out);
        };
        let side = params.side.unwrap_or(board.current_side);
        let config = SearchConfig::new(params.difficulty.unwrap_or(self.difficulty));
        let result = search(board, side, &config);

        writeln!(
            out,
            "info depth {} nodes {} cutoffs {} score {} time {}",
            result.depth, result.nodes, result.cutoffs, result.score, result.elapsed_ms
        )?;
        match result.best {
            Some(m) => writeln!(out, "bestmove {} {} {}", m.source, m.target, m.ships)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }

    /// Logs and reports a rejected command.
    fn reject<W: Write>(&self, reason: &str, out: &mut W) -> io::Result<()> {
        tracing::warn!(reason, "command rejected");
        writeln!(out, "invalid {reason}")?;
        out.flush()
    }
}
