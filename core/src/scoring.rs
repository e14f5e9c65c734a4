use serde::{Deserialize, Serialize};

use crate::*;

/// Lowest value accepted for a swap count recomputed after generation.
const RECOMPUTED_FLOOR: u32 = 5;

/// Swap counts cached at generation time, paired with the board they describe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub optimal_to_goal: u32,
    pub optimal_all_gems: u32,
    pub total_gems: CellCount,
}

/// Profile values as found in a stored game, any of which may be missing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProfile {
    pub optimal_to_goal: Option<u32>,
    pub optimal_all_gems: Option<u32>,
    pub total_gems: Option<CellCount>,
}

impl DifficultyProfile {
    /// Runs both swap-distance searches on a freshly scrambled board.
    pub fn estimate(board: &Board, limits: &SearchLimits) -> Self {
        Self {
            optimal_to_goal: min_swaps_to_solve(board, limits),
            optimal_all_gems: min_swaps_to_collect_all_gems(board, limits),
            total_gems: board.total_gems(),
        }
    }

    /// Completes `partial` from `board`.
    ///
    /// Missing swap counts are estimated and raised to at least 5. A missing gem total
    /// is counted from the board.
    pub fn resolve(partial: PartialProfile, board: &Board, limits: &SearchLimits) -> Self {
        let recompute = |estimate: fn(&Board, &SearchLimits) -> u32| {
            estimate(board, limits).max(RECOMPUTED_FLOOR)
        };
        Self {
            optimal_to_goal: partial
                .optimal_to_goal
                .unwrap_or_else(|| recompute(min_swaps_to_solve)),
            optimal_all_gems: partial
                .optimal_all_gems
                .unwrap_or_else(|| recompute(min_swaps_to_collect_all_gems)),
            total_gems: partial.total_gems.unwrap_or_else(|| board.total_gems()),
        }
    }

    pub const fn max_moves_for_3_stars(&self) -> u32 {
        if self.total_gems > 0 {
            self.optimal_all_gems
        } else {
            self.optimal_to_goal
        }
    }

    pub const fn max_moves_for_2_stars(&self) -> u32 {
        self.optimal_to_goal.saturating_add(2)
    }
}

impl From<DifficultyProfile> for PartialProfile {
    fn from(profile: DifficultyProfile) -> Self {
        Self {
            optimal_to_goal: Some(profile.optimal_to_goal),
            optimal_all_gems: Some(profile.optimal_all_gems),
            total_gems: Some(profile.total_gems),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRating {
    pub stars: u8,
    pub completed: bool,
    /// Finished within the three star move limit.
    pub efficient: bool,
    pub all_gems_collected: bool,
    pub max_moves_for_3_stars: u32,
    pub max_moves_for_2_stars: u32,
    pub total_gems: CellCount,
}

/// Rates a play-through against the profile cached at generation.
pub fn rate(
    completed: bool,
    moves: u32,
    profile: &DifficultyProfile,
    gems_collected: CellCount,
) -> StarRating {
    let max_moves_for_3_stars = profile.max_moves_for_3_stars();
    let max_moves_for_2_stars = profile.max_moves_for_2_stars();
    let efficient = moves <= max_moves_for_3_stars;
    let all_gems_collected = profile.total_gems == 0 || gems_collected >= profile.total_gems;

    let stars = match completed {
        false => 0,
        true if efficient && all_gems_collected => 3,
        true if moves <= max_moves_for_2_stars => 2,
        true => 1,
    };

    StarRating {
        stars,
        completed,
        efficient,
        all_gems_collected,
        max_moves_for_3_stars,
        max_moves_for_2_stars,
        total_gems: profile.total_gems,
    }
}
