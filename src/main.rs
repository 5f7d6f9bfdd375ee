//! Graviton -- a planet-conquest engine speaking a line-oriented protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use graviton::engine::{Engine, Flow};
use graviton::protocol::parser::parse_command;

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        if engine.execute(cmd, &mut out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
