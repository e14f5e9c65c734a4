use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
#[cfg(test)]
use route::l_route;
use route::{Route, lay_route};

mod decoys;
mod endpoints;
mod gems;
mod route;
mod scramble;

pub trait PuzzleGenerator {
    fn generate(self, template: PuzzleTemplate) -> GeneratedPuzzle;
}

/// Board and its difficulty profile, produced together by one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub seed: String,
    pub template: PuzzleTemplate,
    /// Scrambled board handed to the player.
    pub board: Board,
    /// Board as generated, before scrambling.
    pub solution: Board,
    /// Cells of the solution route from start to goal.
    pub route: Vec<Coord2>,
    pub profile: DifficultyProfile,
}

impl GeneratedPuzzle {
    pub fn tier(&self) -> Tier {
        self.template.tier
    }
}

/// Generation pipeline driven by a single seeded random stream.
///
/// Every step draws from the same [`SeededRng`], so the whole puzzle is a function of
/// the seed, the template and the limits.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededPuzzleGenerator {
    seed: String,
    limits: GeneratorLimits,
    search: SearchLimits,
}

impl SeededPuzzleGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_limits(seed, GeneratorLimits::default(), SearchLimits::default())
    }

    pub fn with_limits(
        seed: impl Into<String>,
        limits: GeneratorLimits,
        search: SearchLimits,
    ) -> Self {
        Self {
            seed: seed.into(),
            limits,
            search,
        }
    }
}

impl PuzzleGenerator for SeededPuzzleGenerator {
    fn generate(self, template: PuzzleTemplate) -> GeneratedPuzzle {
        let mut rng = SeededRng::new(&self.seed);
        let size = template.size;

        let (start, goal) = endpoints::pick_endpoints(&mut rng, size, &self.limits);
        let route = route::find_route(&mut rng, size, start, goal, &self.limits);
        let mut solution = Board::new(size, start, goal);
        lay_route(&mut solution, &route);
        gems::place_gems(&mut rng, &mut solution, &route, &template);
        decoys::fill_decoys(&mut rng, &mut solution, &template, &self.limits);

        if !check_connection(&solution, start, goal).connected {
            log::warn!("Solved board for seed {:?} lost its connection", self.seed);
        }

        let scramble = scramble::scramble(&mut rng, &solution, template.tier, &self.limits);
        let profile = DifficultyProfile::estimate(&scramble.board, &self.search);
        log::debug!(
            "Generated {}x{} {:?} puzzle for seed {:?}: {} swaps scrambled, profile {:?}",
            size.0,
            size.1,
            template.tier,
            self.seed,
            scramble.swaps.len(),
            profile
        );

        GeneratedPuzzle {
            seed: self.seed,
            template,
            board: scramble.board,
            solution,
            route: route.cells,
            profile,
        }
    }
}
