//! Self-play game generation.
//!
//! Plays complete AI-vs-AI games from seeded random boards, with each side
//! searching at its own difficulty. Records the position, move, and search
//! statistics for every ply and exports finished games as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::planet::Side;
use crate::board::state::{BoardState, Outcome};
use crate::movegen::random_move;
use crate::protocol::notation::encode_board;
use crate::search::{search, BestMove, Difficulty, SearchConfig};

/// Configuration for self-play game generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search difficulty for side A.
    pub difficulty_a: Difficulty,
    /// Search difficulty for side B.
    pub difficulty_b: Difficulty,
    /// Probability of replacing the searched move with a random legal one.
    pub exploration: f64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Base seed; game `i` uses `seed + i`. 0 draws a base from entropy.
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            difficulty_a: Difficulty::Medium,
            difficulty_b: Difficulty::Medium,
            exploration: 0.0,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    pub fn difficulty(&self, side: Side) -> Difficulty {
        match side {
            Side::A => self.difficulty_a,
            Side::B => self.difficulty_b,
        }
    }
}

/// A single recorded ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub turn: u32,
    pub side: Side,
    /// Board notation before the move.
    pub position: String,
    /// The move played, if the side had one.
    pub mv: Option<BestMove>,
    /// Root search score from `side`'s perspective.
    pub score: f64,
    pub nodes: u64,
    /// Whether `mv` was a random exploration move.
    pub exploratory: bool,
    /// Planets held by A and B before the move.
    pub planets: [usize; 2],
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Seed that reproduces the starting board (`newgame seed <n>`).
    pub seed: u64,
    pub plies: Vec<PlyRecord>,
    pub outcome: Option<Outcome>,
    pub final_turn: u32,
    pub final_planets: [usize; 2],
}

fn planet_counts(board: &BoardState) -> [usize; 2] {
    [board.planet_count(Side::A), board.planet_count(Side::B)]
}

/// Plays a single self-play game from the board generated by `seed`.
///
/// Each ply searches for the side to move, applies the chosen move, and
/// ends the turn. The turn limit guarantees termination.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, seed: u64) -> GameRecord {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = BoardState::random(&mut rng);
    let mut plies = Vec::new();

    while !board.is_game_over() {
        let side = board.current_side;
        let position = encode_board(&board);
        let planets = planet_counts(&board);

        let result = search(&board, side, &SearchConfig::new(config.difficulty(side)));
        let mut mv = result.best;
        let mut exploratory = false;
        if config.exploration > 0.0 && rng.gen::<f64>() < config.exploration {
            if let Some(random) = random_move(&board, side, &mut rng) {
                mv = Some(random.into());
                exploratory = true;
            }
        }

        if let Some(m) = mv {
            if let Err(e) = board.apply_attack(m.source, m.target, m.ships) {
                tracing::warn!(game_id, turn = board.turn, error = %e, "self-play move rejected");
            }
        }

        plies.push(PlyRecord {
            turn: board.turn,
            side,
            position,
            mv,
            score: result.score,
            nodes: result.nodes,
            exploratory,
            planets,
        });

        board.end_turn();
    }

    GameRecord {
        game_id,
        seed,
        plies,
        outcome: board.outcome(),
        final_turn: board.turn,
        final_planets: planet_counts(&board),
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// Records arrive in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game));
    games
}

/// Runs self-play generation, calling `on_game` with each completed game.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    let base_seed = if config.seed != 0 {
        config.seed
    } else {
        SmallRng::from_entropy().gen()
    };
    if config.threads > 1 {
        run_self_play_parallel(config, base_seed, on_game);
    } else {
        run_self_play_sequential(config, base_seed, on_game);
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    tracing::info!(
        game = n,
        of = config.num_games,
        seed = game.seed,
        outcome = game.outcome.map_or("none", Outcome::tag),
        turns = game.final_turn,
        elapsed_s = started.elapsed().as_secs_f64(),
        "game finished"
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, base_seed: u64, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, i, base_seed.wrapping_add(i as u64));
        log_game(config, i + 1, &game, started);
        on_game(game);
    }
}

/// Parallel self-play on a rayon pool. Completed games are sent over a
/// channel and delivered to the callback on the calling thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, base_seed: u64, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "thread pool unavailable, playing sequentially");
            return run_self_play_sequential(config, base_seed, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        let completed = &completed;
        let worker = scope.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let started = Instant::now();
                        let game = play_game(config, i, base_seed.wrapping_add(i as u64));
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(config, n, &game, started);
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }

        if worker.join().is_err() {
            tracing::error!("self-play worker panicked");
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub wins: [usize; 2],
    pub ties: usize,
    pub avg_plies: f64,
    pub avg_final_turn: f64,
    pub exploratory_moves: usize,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Self {
        let mut s = Summary {
            games: games.len(),
            ..Summary::default()
        };
        let mut plies = 0usize;
        let mut turns = 0u64;
        for game in games {
            plies += game.plies.len();
            turns += game.final_turn as u64;
            s.exploratory_moves += game.plies.iter().filter(|p| p.exploratory).count();
            match game.outcome {
                Some(Outcome::Winner(side)) => s.wins[side.index()] += 1,
                Some(Outcome::Tie) => s.ties += 1,
                None => {}
            }
        }
        let n = games.len().max(1) as f64;
        s.avg_plies = plies as f64 / n;
        s.avg_final_turn = turns as f64 / n;
        s
    }
}

/// Writes a human-readable summary of self-play results.
pub fn write_summary<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    let s = Summary::of(games);
    let pct = |k: usize| 100.0 * k as f64 / s.games.max(1) as f64;

    writeln!(out, "=== Self-Play Summary ===")?;
    writeln!(out, "Games: {}", s.games)?;
    writeln!(out, "Avg plies/game: {:.1}", s.avg_plies)?;
    writeln!(out, "Avg final turn: {:.1}", s.avg_final_turn)?;
    writeln!(out, "Exploratory moves: {}", s.exploratory_moves)?;
    writeln!(out, "Results:")?;
    writeln!(out, "  {:>4}: {} ({:.1}%)", "a", s.wins[0], pct(s.wins[0]))?;
    writeln!(out, "  {:>4}: {} ({:.1}%)", "b", s.wins[1], pct(s.wins[1]))?;
    writeln!(out, "  {:>4}: {} ({:.1}%)", "tie", s.ties, pct(s.ties))?;
    out.flush()
}
