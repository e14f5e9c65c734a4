use alloc::vec::Vec;

use ndarray::Array2;
use smallvec::SmallVec;

use super::*;

/// Cells of a simple route from start to goal, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Route {
    pub cells: Vec<Coord2>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Direction of each step, one shorter than the route.
    pub fn steps(&self) -> impl Iterator<Item = Direction> + '_ {
        self.cells
            .windows(2)
            .filter_map(|pair| Direction::between(pair[0], pair[1]))
    }

    pub fn turns(&self) -> usize {
        let steps: Vec<_> = self.steps().collect();
        steps.windows(2).filter(|pair| pair[0] != pair[1]).count()
    }

    /// Indices of interior cells where the route changes direction.
    pub fn turn_indices(&self) -> Vec<usize> {
        let steps: Vec<_> = self.steps().collect();
        steps
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] != pair[1])
            .map(|(i, _)| i + 1)
            .collect()
    }
}

struct Frame {
    pos: Coord2,
    entered: Option<Direction>,
    turns: usize,
    candidates: SmallVec<[Direction; 4]>,
    next: usize,
}

/// Randomized, turn-biased route search with an L-shaped fallback.
pub(crate) fn find_route(
    rng: &mut SeededRng,
    size: Coord2,
    start: Coord2,
    goal: Coord2,
    limits: &GeneratorLimits,
) -> Route {
    let area = usize::from(mult(size.0, size.1));
    let shortest = usize::from(manhattan(start, goal)) + 1;

    for attempt in 0..limits.route_attempts {
        let target = ((rng.range_f64(0.4, 0.7) * area as f64) as usize).clamp(shortest, area);
        let min_turns = (target / 6).max(3);

        if let Some(route) = search_route(rng, size, start, goal, target, min_turns, limits) {
            log::debug!(
                "Route found on attempt {attempt}: {} cells, {} turns (target {target})",
                route.len(),
                route.turns()
            );
            return route;
        }
    }

    log::warn!("No random route from {start:?} to {goal:?}, using L-shaped fallback");
    l_route(start, goal)
}

fn search_route(
    rng: &mut SeededRng,
    size: Coord2,
    start: Coord2,
    goal: Coord2,
    target: usize,
    min_turns: usize,
    limits: &GeneratorLimits,
) -> Option<Route> {
    let mut visited: Array2<bool> = Array2::default(size.to_nd_index());
    visited[start.to_nd_index()] = true;
    let mut stack = alloc::vec![Frame {
        pos: start,
        entered: None,
        turns: 0,
        candidates: shuffled_directions(rng, None, false),
        next: 0,
    }];
    let mut expansions = 0;

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.candidates.get(frame.next) else {
            visited[frame.pos.to_nd_index()] = false;
            stack.pop();
            continue;
        };
        frame.next += 1;
        let (pos, entered, turns) = (frame.pos, frame.entered, frame.turns);

        let Some(next) = step(pos, dir, size) else {
            continue;
        };
        if visited[next.to_nd_index()] {
            continue;
        }

        let length = stack.len() + 1;
        if length > target || usize::from(manhattan(next, goal)) > target - length {
            continue;
        }
        let turns = turns + usize::from(entered.is_some_and(|d| d != dir));

        expansions += 1;
        if expansions > limits.route_expansions {
            return None;
        }

        if next == goal {
            if length * 10 >= target * 7 && turns >= min_turns {
                let mut cells: Vec<_> = stack.iter().map(|frame| frame.pos).collect();
                cells.push(goal);
                return Some(Route { cells });
            }
            continue;
        }

        visited[next.to_nd_index()] = true;
        let candidates = shuffled_directions(rng, Some(dir), turns < min_turns);
        stack.push(Frame {
            pos: next,
            entered: Some(dir),
            turns,
            candidates,
            next: 0,
        });
    }

    None
}

/// All four directions in random order; when `prefer_turns` is set, directions that
/// differ from `last` come first.
fn shuffled_directions(
    rng: &mut SeededRng,
    last: Option<Direction>,
    prefer_turns: bool,
) -> SmallVec<[Direction; 4]> {
    let mut dirs = SmallVec::from(Direction::ALL);
    rng.shuffle(&mut dirs);
    if let (Some(last), true) = (last, prefer_turns) {
        // stable: keeps the shuffled order inside each group
        dirs.sort_by_key(|&dir| dir == last);
    }
    dirs
}

/// Straight along x, then along y. Always a valid simple route.
pub(crate) fn l_route(start: Coord2, goal: Coord2) -> Route {
    let mut cells = alloc::vec![start];
    let (mut x, mut y) = start;
    while x != goal.0 {
        x = if x < goal.0 { x + 1 } else { x - 1 };
        cells.push((x, y));
    }
    while y != goal.1 {
        y = if y < goal.1 { y + 1 } else { y - 1 };
        cells.push((x, y));
    }
    Route { cells }
}

/// Writes the route tiles; each cell opens towards its predecessor and successor.
pub(crate) fn lay_route(board: &mut Board, route: &Route) {
    let last = route.len().saturating_sub(1);
    for (i, &pos) in route.cells.iter().enumerate() {
        let mut edges = Edges::empty();
        if let Some(prev) = i.checked_sub(1).map(|p| route.cells[p]) {
            edges |= Direction::between(pos, prev).map(Edges::from).unwrap_or_default();
        }
        if let Some(&next) = route.cells.get(i + 1) {
            edges |= Direction::between(pos, next).map(Edges::from).unwrap_or_default();
        }

        let id = match i {
            0 => TileId::Start,
            i if i == last => TileId::Goal,
            i => TileId::Route(i.try_into().unwrap_or(CellCount::MAX)),
        };
        board[pos] = Tile::path(id, edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_simple_route(route: &Route, start: Coord2, goal: Coord2) -> bool {
        let mut seen = alloc::collections::BTreeSet::new();
        route.cells.first() == Some(&start)
            && route.cells.last() == Some(&goal)
            && route.cells.iter().all(|&cell| seen.insert(cell))
            && route.steps().count() + 1 == route.len()
    }

    #[test]
    fn l_route_goes_x_then_y() {
        let route = l_route((3, 0), (1, 2));

        assert_eq!(route.cells, [(3, 0), (2, 0), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(route.turns(), 1);
        assert_eq!(route.turn_indices(), [2]);
    }

    #[test]
    fn random_routes_meet_length_and_turn_bounds() {
        let limits = GeneratorLimits::default();
        for seed in ["a", "b", "c", "d", "e", "f"] {
            let mut rng = SeededRng::new(seed);
            let route = find_route(&mut rng, (6, 6), (0, 0), (5, 5), &limits);

            assert!(is_simple_route(&route, (0, 0), (5, 5)));
            if route != l_route((0, 0), (5, 5)) {
                assert!(route.turns() >= 3);
                assert!(route.len() <= 36 * 7 / 10);
            }
        }
    }

    #[test]
    fn exhausted_search_falls_back_to_l_route() {
        let limits = GeneratorLimits {
            route_expansions: 0,
            ..GeneratorLimits::default()
        };
        let mut rng = SeededRng::new("fallback");

        let route = find_route(&mut rng, (5, 5), (0, 0), (4, 4), &limits);

        assert_eq!(route, l_route((0, 0), (4, 4)));
    }

    #[test]
    fn laid_route_is_connected() {
        let route = l_route((0, 0), (2, 2));
        let mut board = Board::new((3, 3), (0, 0), (2, 2));

        lay_route(&mut board, &route);

        assert_eq!(board[(0, 0)].id, TileId::Start);
        assert_eq!(board[(2, 2)].id, TileId::Goal);
        assert_eq!(board[(2, 0)].edges, Edges::WEST | Edges::SOUTH);
        assert!(check_connection(&board, (0, 0), (2, 2)).connected);
    }

    #[test]
    fn turn_preference_puts_straight_last() {
        let mut rng = SeededRng::new("turns");
        for _ in 0..20 {
            let dirs = shuffled_directions(&mut rng, Some(Direction::East), true);
            assert_eq!(dirs.last(), Some(&Direction::East));
        }
    }
}
