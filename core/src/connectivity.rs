use alloc::vec;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of a start-to-goal search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub connected: bool,
    /// Cells from start to goal when connected, empty otherwise.
    pub path: Vec<Coord2>,
}

/// Whether a single step from `from` to the adjacent `to` is traversable.
///
/// Both cells must be path tiles and both facing sides must be open.
pub fn can_step(board: &Board, from: Coord2, to: Coord2) -> bool {
    let Some(dir) = Direction::between(from, to) else {
        return false;
    };
    match (board.tile(from), board.tile(to)) {
        (Some(a), Some(b)) => a.is_open(dir) && b.is_open(dir.opposite()),
        _ => false,
    }
}

/// Depth-first search from `start` to `goal`.
///
/// The returned path is the search branch that reached the goal, which is a simple
/// route but not necessarily the shortest one.
pub fn check_connection(board: &Board, start: Coord2, goal: Coord2) -> Connection {
    if !board.contains(start) || !board.contains(goal) || !board[start].is_path() {
        return Connection::default();
    }

    let mut visited: Array2<bool> = Array2::default(board.size().to_nd_index());
    visited[start.to_nd_index()] = true;
    let mut stack = vec![(start, board.iter_neighbors(start))];

    while let Some((pos, neighbors)) = stack.last_mut() {
        let pos = *pos;
        if pos == goal {
            return Connection {
                connected: true,
                path: stack.iter().map(|(cell, _)| *cell).collect(),
            };
        }

        let unvisited = neighbors.find(|&(_, next)| {
            !visited[next.to_nd_index()] && can_step(board, pos, next)
        });
        match unvisited {
            Some((_, next)) => {
                visited[next.to_nd_index()] = true;
                stack.push((next, board.iter_neighbors(next)));
            }
            None => {
                stack.pop();
            }
        }
    }

    Connection::default()
}

/// Every cell reachable from `origin` through traversable steps, `origin` included.
pub fn reachable_from(board: &Board, origin: Coord2) -> Array2<bool> {
    let mut reached: Array2<bool> = Array2::default(board.size().to_nd_index());
    if !board.contains(origin) || !board[origin].is_path() {
        return reached;
    }

    reached[origin.to_nd_index()] = true;
    let mut to_visit = vec![origin];
    while let Some(pos) = to_visit.pop() {
        for (_, next) in board.iter_neighbors(pos) {
            if !reached[next.to_nd_index()] && can_step(board, pos, next) {
                reached[next.to_nd_index()] = true;
                to_visit.push(next);
            }
        }
    }
    reached
}

/// Gems on tiles reachable from the start cell.
pub fn gems_reachable(board: &Board) -> CellCount {
    let reached = reachable_from(board, board.start());
    board
        .iter_positions()
        .filter(|&pos| reached[pos.to_nd_index()] && board[pos].has_gem())
        .count()
        .try_into()
        .unwrap_or(CellCount::MAX)
}

/// Goal reachable from start with every gem on the way.
pub fn connects_all_gems(board: &Board) -> bool {
    let reached = reachable_from(board, board.start());
    reached[board.goal().to_nd_index()]
        && board
            .iter_positions()
            .filter(|&pos| board[pos].has_gem())
            .all(|pos| reached[pos.to_nd_index()])
}
