//! Swap-distance estimation.
//!
//! Breadth-first search over boards reachable by swapping two movable tiles. The
//! search is capped in both stored states and depth, so on larger boards the reported
//! count is an upper-bound approximation, and an exhausted search reports
//! [`SearchLimits::fallback_swaps`].

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::*;

/// Estimated swaps until start and goal are connected.
pub fn min_swaps_to_solve(board: &Board, limits: &SearchLimits) -> u32 {
    search(board, limits, limits.max_depth_to_goal, |state| {
        check_connection(state, state.start(), state.goal()).connected
    })
}

/// Estimated swaps until the goal is reachable with every gem collected on the way.
pub fn min_swaps_to_collect_all_gems(board: &Board, limits: &SearchLimits) -> u32 {
    search(board, limits, limits.max_depth_all_gems, connects_all_gems)
}

fn search(
    board: &Board,
    limits: &SearchLimits,
    max_depth: u32,
    is_solved: impl Fn(&Board) -> bool,
) -> u32 {
    if is_solved(board) {
        return 0;
    }

    let movable = board.movable_positions();
    let mut seen = HashSet::new();
    seen.insert(layout_key(board, &movable));
    let mut queue = VecDeque::from([(board.clone(), 0)]);
    let mut stored = 1;

    while let Some((mut state, swaps)) = queue.pop_front() {
        if swaps >= max_depth {
            continue;
        }

        for (i, &a) in movable.iter().enumerate() {
            for &b in &movable[i + 1..] {
                state.swap(a, b);
                if seen.insert(layout_key(&state, &movable)) {
                    if is_solved(&state) {
                        log::debug!("Solved in {} swaps after {stored} states", swaps + 1);
                        return swaps + 1;
                    }
                    if stored >= limits.max_states {
                        log::debug!("Swap search hit the state cap at depth {swaps}");
                        return limits.fallback_swaps;
                    }
                    queue.push_back((state.clone(), swaps + 1));
                    stored += 1;
                }
                state.swap(a, b);
            }
        }
    }

    log::debug!("Swap search exhausted after {stored} states");
    limits.fallback_swaps
}

/// Identical tiles are interchangeable, so layouts are keyed by shape and gem only.
fn layout_key(board: &Board, movable: &[Coord2]) -> Vec<u8> {
    movable
        .iter()
        .map(|&pos| {
            let tile = &board[pos];
            tile.edges.bits() | (u8::from(tile.has_gem()) << 4)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_from_rows;

    #[test]
    fn connected_board_needs_no_swaps() {
        let board = board_from_rows(&["S──G"]);

        assert_eq!(min_swaps_to_solve(&board, &SearchLimits::default()), 0);
        assert_eq!(min_swaps_to_collect_all_gems(&board, &SearchLimits::default()), 0);
    }

    #[test]
    fn single_swap_is_found() {
        let mut board = board_from_rows(&[
            "S─┐", //
            "..│", //
            "G─┘", //
        ]);
        board.swap((1, 0), (2, 1));

        assert_eq!(min_swaps_to_solve(&board, &SearchLimits::default()), 1);
    }

    #[test]
    fn two_swaps_are_found() {
        let solved = board_from_rows(&[
            "S─┐.", //
            "┌─┘.", //
            "└──G", //
        ]);
        let mut board = solved.clone();
        board.swap((1, 0), (2, 1));
        board.swap((0, 1), (2, 2));

        assert_eq!(min_swaps_to_solve(&board, &SearchLimits::default()), 2);
    }

    #[test]
    fn gems_variant_needs_the_gem_connected() {
        // the gem tile has no openings, so no swap sequence reaches it
        let board = board_from_rows(&[
            "S┬G.", //
            "╷╵.*", //
        ]);

        assert_eq!(min_swaps_to_solve(&board, &SearchLimits::default()), 0);
        assert_eq!(board.total_gems(), 1);
        assert!(!connects_all_gems(&board));
        assert_eq!(
            min_swaps_to_collect_all_gems(&board, &SearchLimits::default()),
            SearchLimits::default().fallback_swaps
        );
    }

    #[test]
    fn exhausted_search_reports_fallback() {
        let mut board = board_from_rows(&[
            "S─┐", //
            "..│", //
            "G─┘", //
        ]);
        board.swap((1, 0), (2, 1));
        let limits = SearchLimits {
            max_depth_to_goal: 0,
            fallback_swaps: 7,
            ..SearchLimits::default()
        };

        assert_eq!(min_swaps_to_solve(&board, &limits), 7);
    }
}
