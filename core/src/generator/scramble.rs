use alloc::vec::Vec;

use super::*;

/// A scrambled board and the swaps that produced it from the solved board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Scramble {
    pub board: Board,
    pub swaps: Vec<(Coord2, Coord2)>,
}

impl Scramble {
    fn unscrambled(solution: &Board) -> Self {
        Self {
            board: solution.clone(),
            swaps: Vec::new(),
        }
    }

    fn is_connected(&self) -> bool {
        check_connection(&self.board, self.board.start(), self.board.goal()).connected
    }
}

fn same_shape(a: &Tile, b: &Tile) -> bool {
    a.edges == b.edges && a.has_gem() == b.has_gem()
}

/// Swaps of movable tiles that rebuild the shape of `solution` on `board`, found by
/// selection sort over the movable cells. `None` when a needed shape is missing.
pub(crate) fn solving_swaps(board: &Board, solution: &Board) -> Option<Vec<(Coord2, Coord2)>> {
    let movable = board.movable_positions();
    if movable != solution.movable_positions() {
        return None;
    }

    let mut board = board.clone();
    let mut swaps = Vec::new();
    for (i, &target) in movable.iter().enumerate() {
        let wanted = &solution[target];
        if same_shape(&board[target], wanted) {
            continue;
        }
        let source = movable[i + 1..]
            .iter()
            .copied()
            .find(|&pos| same_shape(&board[pos], wanted))?;
        board.swap(target, source);
        swaps.push((target, source));
    }
    Some(swaps)
}

/// Whether swapping movable tiles of `board` can connect start and goal, checked by
/// playing [`solving_swaps`] on a copy.
pub(crate) fn is_solvable(board: &Board, solution: &Board) -> bool {
    let Some(swaps) = solving_swaps(board, solution) else {
        return false;
    };
    let mut board = board.clone();
    for (a, b) in swaps {
        board.swap(a, b);
    }
    check_connection(&board, board.start(), board.goal()).connected
}

/// Number of random swaps for `movable` tiles: `max(8, 0.7 * movable)`, scaled by tier.
pub(crate) fn swap_budget(movable: usize, tier: Tier) -> usize {
    let base = (movable * 7 / 10).max(8);
    (base * tier.scramble_percent()).div_ceil(100)
}

/// Permutes the movable tiles of `solution` into a puzzle that still has a solution.
///
/// Falls back to the solved board itself when no acceptable scramble is found.
pub(crate) fn scramble(
    rng: &mut SeededRng,
    solution: &Board,
    tier: Tier,
    limits: &GeneratorLimits,
) -> Scramble {
    let movable = solution.movable_positions();
    if movable.len() < 2 {
        log::warn!("Only {} movable tiles, leaving board solved", movable.len());
        return Scramble::unscrambled(solution);
    }

    let budget = swap_budget(movable.len(), tier);
    for attempt in 0..limits.scramble_attempts {
        let mut scramble = Scramble::unscrambled(solution);
        for _ in 0..budget {
            random_swap(rng, &mut scramble, &movable);
        }

        // an already connected board is not a puzzle
        for _ in 0..limits.corrective_swaps {
            if !scramble.is_connected() {
                break;
            }
            random_swap(rng, &mut scramble, &movable);
        }

        finalize(&mut scramble.board, solution);
        if !scramble.is_connected() && is_solvable(&scramble.board, solution) {
            log::debug!(
                "Scramble accepted on attempt {attempt} after {} swaps",
                scramble.swaps.len()
            );
            return scramble;
        }
    }

    log::warn!("No acceptable scramble found, presenting the solved board");
    Scramble::unscrambled(solution)
}

fn random_swap(rng: &mut SeededRng, scramble: &mut Scramble, movable: &[Coord2]) {
    let i = rng.below(movable.len());
    let mut j = rng.below(movable.len() - 1);
    if j >= i {
        j += 1;
    }
    let (a, b) = (movable[i], movable[j]);
    scramble.board.swap(a, b);
    scramble.swaps.push((a, b));
}

/// Restores endpoint identities and replaces an endpoint tile that lost its openings.
fn finalize(board: &mut Board, solution: &Board) {
    board.restamp_endpoints();
    for pos in [board.start(), board.goal()] {
        if !board[pos].is_connectable() {
            log::warn!("Endpoint at {pos:?} not connectable after scramble, restoring it");
            board[pos] = solution[pos];
        }
    }
}
