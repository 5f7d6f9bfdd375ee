//! Search and planning.
//!
//! Fixed-depth minimax with alpha-beta pruning over the fuzzy-ranked
//! candidate moves. Difficulty selects the depth.

pub mod minimax;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::{EvalWeights, ShipPolicy};
use crate::movegen::DEFAULT_MAX_TARGETS;

pub use minimax::{get_best_move, search, BestMove, SearchResult, Searcher};

/// Search strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// All tiers, weakest first.
pub const ALL_DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl Difficulty {
    /// Plies searched at this tier.
    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for difficulty names outside `easy`, `medium`, `hard`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Everything a search needs besides the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub difficulty: Difficulty,
    pub weights: EvalWeights,
    pub policy: ShipPolicy,
    /// Nearest targets considered per source planet.
    pub max_targets: usize,
    /// Added per unit of aggressiveness at maximizing nodes.
    pub aggression_bonus: f64,
}

impl SearchConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        SearchConfig {
            difficulty,
            ..SearchConfig::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            difficulty: Difficulty::default(),
            weights: EvalWeights::default(),
            policy: ShipPolicy::default(),
            max_targets: DEFAULT_MAX_TARGETS,
            aggression_bonus: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_per_tier() {
        assert_eq!(Difficulty::Easy.depth(), 1);
        assert_eq!(Difficulty::Medium.depth(), 2);
        assert_eq!(Difficulty::Hard.depth(), 3);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        for d in ALL_DIFFICULTIES {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "insane".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, ParseDifficultyError("insane".into()));
        assert!(err.to_string().contains("insane"));
    }

    #[test]
    fn config_defaults() {
        let cfg = SearchConfig::new(Difficulty::Hard);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.max_targets, 8);
        assert_eq!(cfg.aggression_bonus, 10.0);
        assert_eq!(cfg.weights, EvalWeights::default());
    }
}
