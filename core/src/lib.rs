#![no_std]

extern crate alloc;

use alloc::string::String;

pub use board::*;
pub use config::*;
pub use connectivity::*;
pub use daily::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use rng::*;
pub use scoring::*;
pub use snapshot::*;
pub use solver::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod connectivity;
mod daily;
mod difficulty;
mod engine;
mod error;
mod generator;
mod rng;
mod scoring;
mod snapshot;
mod solver;
mod tile;
mod types;

/// Generates the puzzle for `seed` with the tier of weekday `day_index` and default
/// limits.
pub fn generate_puzzle(seed: &str, day_index: u32) -> GeneratedPuzzle {
    let template = template_for_seed(seed, difficulty_for_day(day_index));
    generate_with_template(seed, template, &EngineConfig::default())
}

pub fn generate_with_template(
    seed: impl Into<String>,
    template: PuzzleTemplate,
    config: &EngineConfig,
) -> GeneratedPuzzle {
    SeededPuzzleGenerator::with_limits(seed, config.generator, config.search).generate(template)
}
