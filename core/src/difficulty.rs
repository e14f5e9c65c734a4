use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const fn catalog(self) -> &'static [PuzzleTemplate] {
        match self {
            Tier::Easy => EASY_TEMPLATES,
            Tier::Medium => MEDIUM_TEMPLATES,
            Tier::Hard => HARD_TEMPLATES,
        }
    }

    /// Scale of the scramble swap count, in percent.
    pub const fn scramble_percent(self) -> usize {
        match self {
            Tier::Easy => 100,
            Tier::Medium => 120,
            Tier::Hard => 140,
        }
    }
}

/// How gems are attached to the generated route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemStrategy {
    /// Gems sit on route tiles and move with them.
    OnRoute,
    /// Gems sit on locked one-cell spurs hanging off the route.
    Branches,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleTemplate {
    pub size: Coord2,
    pub complexity: u8,
    pub gem_count: u8,
    pub decoy_density: f64,
    pub target_optimal_moves: u8,
    pub tier: Tier,
    pub gem_strategy: GemStrategy,
}

impl PuzzleTemplate {
    pub const fn new(
        (cols, rows): Coord2,
        complexity: u8,
        gem_count: u8,
        decoy_density: f64,
        target_optimal_moves: u8,
        tier: Tier,
        gem_strategy: GemStrategy,
    ) -> Self {
        // Two endpoints need at least two cells.
        let cols = if cols < 2 { 2 } else { cols };
        let rows = if rows < 1 { 1 } else { rows };
        Self {
            size: (cols, rows),
            complexity,
            gem_count,
            decoy_density,
            target_optimal_moves,
            tier,
            gem_strategy,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

use GemStrategy::*;
use Tier::*;

const EASY_TEMPLATES: &[PuzzleTemplate] = &[
    PuzzleTemplate::new((4, 4), 1, 1, 0.4, 3, Easy, OnRoute),
    PuzzleTemplate::new((4, 3), 1, 1, 0.4, 2, Easy, OnRoute),
    PuzzleTemplate::new((5, 4), 2, 2, 0.45, 3, Easy, OnRoute),
];

const MEDIUM_TEMPLATES: &[PuzzleTemplate] = &[
    PuzzleTemplate::new((5, 5), 2, 2, 0.5, 4, Medium, OnRoute),
    PuzzleTemplate::new((6, 5), 3, 2, 0.5, 5, Medium, Branches),
    PuzzleTemplate::new((6, 6), 3, 3, 0.55, 5, Medium, Branches),
];

const HARD_TEMPLATES: &[PuzzleTemplate] = &[
    PuzzleTemplate::new((6, 6), 4, 3, 0.55, 6, Hard, Branches),
    PuzzleTemplate::new((7, 6), 4, 3, 0.6, 7, Hard, Branches),
    PuzzleTemplate::new((7, 7), 5, 4, 0.6, 8, Hard, OnRoute),
];

/// Weekly rotation: weekend boundary days are easy, the middle of the week is hard.
pub const fn difficulty_for_day(day_index: u32) -> Tier {
    match day_index % 7 {
        0 | 6 => Easy,
        1 | 2 | 5 => Medium,
        _ => Hard,
    }
}

/// Picks a template of `tier` from the sum of the seed's character codes.
pub fn template_for_seed(seed: &str, tier: Tier) -> PuzzleTemplate {
    let catalog = tier.catalog();
    let sum: u64 = seed.chars().map(|ch| u64::from(u32::from(ch))).sum();
    catalog[(sum % catalog.len() as u64) as usize]
}
