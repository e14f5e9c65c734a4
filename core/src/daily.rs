use alloc::format;
use alloc::string::String;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::*;

/// Seed of the shared puzzle for a calendar day, e.g. `SEED_2025-08-11`.
pub fn daily_seed(date_key: &str) -> String {
    format!("SEED_{date_key}")
}

/// Fresh seed for an unranked puzzle.
pub fn practice_seed(rng: &mut impl RngCore) -> String {
    format!("PRACTICE_{:08x}", rng.next_u32())
}

/// What to generate: a seed and the tier whose catalog supplies the template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRequest {
    pub seed: String,
    pub tier: Tier,
    /// Position in the daily series, absent for practice puzzles.
    #[serde(default)]
    pub number: Option<u32>,
}

impl PuzzleRequest {
    pub fn new(seed: impl Into<String>, tier: Tier) -> Self {
        Self {
            seed: seed.into(),
            tier,
            number: None,
        }
    }

    /// The daily puzzle for `date_key`; `day_index` is the weekday, 0 for Sunday.
    pub fn daily(date_key: &str, day_index: u32, number: u32) -> Self {
        Self {
            seed: daily_seed(date_key),
            tier: difficulty_for_day(day_index),
            number: Some(number),
        }
    }

    pub fn practice(rng: &mut impl RngCore, tier: Tier) -> Self {
        Self::new(practice_seed(rng), tier)
    }

    pub fn template(&self) -> PuzzleTemplate {
        template_for_seed(&self.seed, self.tier)
    }

    pub fn generate(&self, config: &EngineConfig) -> GeneratedPuzzle {
        generate_with_template(&self.seed, self.template(), config)
    }
}
