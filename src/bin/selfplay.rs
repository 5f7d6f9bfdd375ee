//! Self-play game generation CLI.
//!
//! Plays AI-vs-AI games and writes the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use graviton::search::Difficulty;
use graviton::selfplay::{self, SelfPlayConfig};

/// Plays AI-vs-AI games and records every ply.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Search difficulty for side A (easy, medium, hard).
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty_a: Difficulty,

    /// Search difficulty for side B (easy, medium, hard).
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty_b: Difficulty,

    /// Probability of playing a random legal move instead of the searched one.
    #[arg(short, long, default_value_t = 0.0)]
    exploration: f64,

    /// Number of parallel threads.
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Base random seed, 0 for entropy.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress progress logging and the summary.
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,
}

impl From<Args> for SelfPlayConfig {
    fn from(args: Args) -> Self {
        SelfPlayConfig {
            num_games: args.games,
            difficulty_a: args.difficulty_a,
            difficulty_b: args.difficulty_b,
            exploration: args.exploration.clamp(0.0, 1.0),
            threads: args.threads.max(1),
            seed: args.seed,
            quiet: args.quiet,
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let output = args.output.clone();
    let config = SelfPlayConfig::from(args);

    if !config.quiet {
        tracing::info!(
            games = config.num_games,
            a = %config.difficulty_a,
            b = %config.difficulty_b,
            exploration = config.exploration,
            threads = config.threads,
            "starting self-play"
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        tracing::info!(
            games = games.len(),
            elapsed_s = elapsed.as_secs_f64(),
            "self-play complete"
        );
        selfplay::write_summary(&games, &mut io::stderr())?;
    }

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !config.quiet {
                tracing::info!(path = %path.display(), "wrote {} games", games.len());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}
