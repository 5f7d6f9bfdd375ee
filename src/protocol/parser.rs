//! Driver command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use crate::board::planet::{Coord, Side};
use crate::search::Difficulty;

/// Overrides passed with the `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoParams {
    pub difficulty: Option<Difficulty>,
    pub side: Option<Side>,
}

/// Options the engine accepts through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOption {
    /// Default search tier for `go`.
    Difficulty,
    /// Seed for the RNG behind unseeded `newgame`.
    Seed,
}

impl EngineOption {
    /// Case-insensitive lookup by option name.
    pub fn from_name(name: &str) -> Option<EngineOption> {
        match name.to_ascii_lowercase().as_str() {
            "difficulty" => Some(EngineOption::Difficulty),
            "seed" => Some(EngineOption::Seed),
            _ => None,
        }
    }
}

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> value <x>`. The value is
    /// validated by the engine.
    SetOption { option: EngineOption, value: String },

    /// Start a fresh randomized game, optionally seeded.
    NewGame { seed: Option<u64> },

    /// Replace the board with a position in board notation.
    Position { notation: String },

    /// Print the current position.
    Board,

    /// Attack with the side to move: `attack <sx> <sy> <tx> <ty> <n>`.
    Attack { source: Coord, target: Coord, ships: u32 },

    /// End the side to move's turn.
    EndTurn,

    /// Show the fuzzy analysis of one attack.
    Analyze { source: Coord, target: Coord, side: Option<Side> },

    /// Search for the best move.
    Go(GoParams),

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "board" => Some(Command::Board),
        "endturn" => Some(Command::EndTurn),

        "newgame" => parse_newgame(&tokens),
        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "attack" => parse_attack(&tokens),
        "analyze" => parse_analyze(&tokens),
        "go" => parse_go(&tokens),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

fn parse_coord(x: &str, y: &str) -> Option<Coord> {
    Some(Coord::new(x.parse().ok()?, y.parse().ok()?))
}

/// Parses `newgame [seed <n>]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_] => Some(Command::NewGame { seed: None }),
        [_, "seed", n] => match n.parse::<u64>() {
            Ok(seed) => Some(Command::NewGame { seed: Some(seed) }),
            Err(_) => {
                tracing::warn!(value = *n, "invalid seed");
                None
            }
        },
        _ => {
            tracing::warn!("malformed newgame: expected 'newgame [seed <n>]'");
            None
        }
    }
}

/// Parses `setoption name <Difficulty|Seed> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    let [_, "name", name, "value", value] = tokens else {
        tracing::warn!("malformed setoption: expected 'setoption name <id> value <x>'");
        return None;
    };
    match EngineOption::from_name(name) {
        Some(option) => Some(Command::SetOption {
            option,
            value: value.to_string(),
        }),
        None => {
            tracing::warn!(option = *name, "unknown option");
            None
        }
    }
}

/// Parses `position <notation>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        tracing::warn!("malformed position: expected 'position <notation>'");
        return None;
    }
    Some(Command::Position {
        notation: tokens[1].to_string(),
    })
}

/// Parses `attack <sx> <sy> <tx> <ty> <n>`.
fn parse_attack(tokens: &[&str]) -> Option<Command> {
    let parsed = match tokens {
        [_, sx, sy, tx, ty, n] => parse_coord(sx, sy)
            .zip(parse_coord(tx, ty))
            .zip(n.parse::<u32>().ok()),
        _ => None,
    };
    match parsed {
        Some(((source, target), ships)) => Some(Command::Attack { source, target, ships }),
        None => {
            tracing::warn!("malformed attack: expected 'attack <sx> <sy> <tx> <ty> <n>'");
            None
        }
    }
}

/// Parses `analyze <sx> <sy> <tx> <ty> [side <a|b>]`.
fn parse_analyze(tokens: &[&str]) -> Option<Command> {
    let (coords, side) = match tokens {
        [_, sx, sy, tx, ty] => (parse_coord(sx, sy).zip(parse_coord(tx, ty)), Ok(None)),
        [_, sx, sy, tx, ty, "side", s] => (
            parse_coord(sx, sy).zip(parse_coord(tx, ty)),
            Side::from_name(s).map(Some).ok_or(*s),
        ),
        _ => (None, Ok(None)),
    };
    match (coords, side) {
        (Some((source, target)), Ok(side)) => Some(Command::Analyze { source, target, side }),
        (_, Err(s)) => {
            tracing::warn!(side = s, "unknown side");
            None
        }
        (None, _) => {
            tracing::warn!("malformed analyze: expected 'analyze <sx> <sy> <tx> <ty> [side <a|b>]'");
            None
        }
    }
}

/// Parses `go [difficulty <d>] [side <a|b>]`. Bad values are dropped
/// with a warning; the search still runs.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    for pair in tokens[1..].chunks(2) {
        match pair {
            ["difficulty", d] => match d.parse::<Difficulty>() {
                Ok(d) => params.difficulty = Some(d),
                Err(e) => tracing::warn!("{e}"),
            },
            ["side", s] => match Side::from_name(s) {
                Some(side) => params.side = Some(side),
                None => tracing::warn!(side = *s, "unknown side"),
            },
            _ => tracing::warn!(params = ?pair, "unknown go parameter"),
        }
    }
    Some(Command::Go(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("  endturn  "), Some(Command::EndTurn));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_newgame() {
        assert_eq!(parse_command("newgame"), Some(Command::NewGame { seed: None }));
        assert_eq!(
            parse_command("newgame seed 42"),
            Some(Command::NewGame { seed: Some(42) })
        );
        assert_eq!(parse_command("newgame seed x"), None);
        assert_eq!(parse_command("newgame 42"), None);
    }

    #[test]
    fn parse_setoption_known_names() {
        assert_eq!(
            parse_command("setoption name Difficulty value hard"),
            Some(Command::SetOption {
                option: EngineOption::Difficulty,
                value: "hard".to_string(),
            })
        );
        assert_eq!(
            parse_command("setoption name seed value 12"),
            Some(Command::SetOption {
                option: EngineOption::Seed,
                value: "12".to_string(),
            })
        );
    }

    #[test]
    fn parse_setoption_rejects_unknown_or_malformed() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption name Seed"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
        assert_eq!(parse_command("setoption name Hash value 64"), None);
        assert_eq!(parse_command("setoption name Seed value 1 2"), None);
    }

    #[test]
    fn parse_position() {
        let notation = "0a/a2:10,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,b2:10";
        assert_eq!(
            parse_command(&format!("position {notation}")),
            Some(Command::Position {
                notation: notation.to_string(),
            })
        );
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn parse_attack() {
        assert_eq!(
            parse_command("attack 0 0 1 1 3"),
            Some(Command::Attack {
                source: Coord::new(0, 0),
                target: Coord::new(1, 1),
                ships: 3,
            })
        );
    }

    #[test]
    fn parse_attack_keeps_off_board_coords() {
        // Bounds are checked by the board, not the parser.
        assert_eq!(
            parse_command("attack 0 0 9 1 3"),
            Some(Command::Attack {
                source: Coord::new(0, 0),
                target: Coord::new(9, 1),
                ships: 3,
            })
        );
    }

    #[test]
    fn parse_attack_malformed() {
        assert_eq!(parse_command("attack 0 0 1 1"), None);
        assert_eq!(parse_command("attack 0 0 1 1 -2"), None);
        assert_eq!(parse_command("attack a b c d e"), None);
    }

    #[test]
    fn parse_analyze() {
        assert_eq!(
            parse_command("analyze 0 0 1 0"),
            Some(Command::Analyze {
                source: Coord::new(0, 0),
                target: Coord::new(1, 0),
                side: None,
            })
        );
        assert_eq!(
            parse_command("analyze 3 3 2 2 side b"),
            Some(Command::Analyze {
                source: Coord::new(3, 3),
                target: Coord::new(2, 2),
                side: Some(Side::B),
            })
        );
        assert_eq!(parse_command("analyze 3 3 2 2 side z"), None);
        assert_eq!(parse_command("analyze 3 3"), None);
    }

    #[test]
    fn parse_go_no_params() {
        assert_eq!(parse_command("go"), Some(Command::Go(GoParams::default())));
    }

    #[test]
    fn parse_go_combined_params() {
        assert_eq!(
            parse_command("go difficulty Hard side b"),
            Some(Command::Go(GoParams {
                difficulty: Some(Difficulty::Hard),
                side: Some(Side::B),
            }))
        );
    }

    #[test]
    fn parse_go_ignores_bad_values() {
        assert_eq!(
            parse_command("go difficulty extreme side a"),
            Some(Command::Go(GoParams {
                difficulty: None,
                side: Some(Side::A),
            }))
        );
    }

    #[test]
    fn parse_go_skips_dangling_and_unknown_params() {
        assert_eq!(
            parse_command("go depth 9 side b difficulty"),
            Some(Command::Go(GoParams {
                difficulty: None,
                side: Some(Side::B),
            }))
        );
    }
}
