use alloc::vec::Vec;

use ndarray::Array2;

use super::*;

/// Chance that a decoy side facing the route is closed off.
const CLOSE_TOWARDS_ROUTE_CHANCE: f64 = 0.7;

/// Fills free cells with simple decoy shapes and lays a few isolated decoy chains.
///
/// Cells holding path tiles when this runs (route and gem spurs) are never touched.
pub(crate) fn fill_decoys(
    rng: &mut SeededRng,
    board: &mut Board,
    template: &PuzzleTemplate,
    limits: &GeneratorLimits,
) {
    let mut protected: Array2<bool> = Array2::default(board.size().to_nd_index());
    for pos in board.iter_positions() {
        protected[pos.to_nd_index()] = board[pos].is_path();
    }

    let density = (template.decoy_density + rng.range_f64(-0.1, 0.1)).clamp(0.4, 0.6);
    let mut ordinal: CellCount = 0;

    for pos in board.iter_positions() {
        if protected[pos.to_nd_index()] || !rng.chance(density) {
            continue;
        }

        let Some(&shape) = rng.choose(&Edges::SIMPLE_SHAPES) else {
            continue;
        };
        let mut edges = shape;
        for (dir, next) in board.iter_neighbors(pos) {
            if protected[next.to_nd_index()]
                && edges.is_open(dir)
                && rng.chance(CLOSE_TOWARDS_ROUTE_CHANCE)
            {
                edges.remove(Edges::from(dir));
            }
        }
        if edges.is_empty() {
            continue;
        }

        board[pos] = Tile::path(TileId::Decoy(ordinal), edges);
        ordinal += 1;
    }

    let segments = rng.range_inclusive(1, 3);
    let mut laid = 0;
    for _ in 0..segments {
        if let Some(chain) = find_free_chain(rng, board, &protected, limits) {
            for (i, &pos) in chain.iter().enumerate() {
                let mut edges = Edges::empty();
                if let Some(&prev) = i.checked_sub(1).and_then(|p| chain.get(p)) {
                    edges |= Direction::between(pos, prev).map(Edges::from).unwrap_or_default();
                }
                if let Some(&next) = chain.get(i + 1) {
                    edges |= Direction::between(pos, next).map(Edges::from).unwrap_or_default();
                }
                board[pos] = Tile::path(TileId::Decoy(ordinal), edges);
                protected[pos.to_nd_index()] = true;
                ordinal += 1;
            }
            laid += 1;
        }
    }

    log::debug!("Decoys at density {density:.2}: {ordinal} tiles, {laid}/{segments} segments");
}

/// Random walk of 2 to 4 unprotected cells.
fn find_free_chain(
    rng: &mut SeededRng,
    board: &Board,
    protected: &Array2<bool>,
    limits: &GeneratorLimits,
) -> Option<Vec<Coord2>> {
    let free: Vec<_> = board
        .iter_positions()
        .filter(|pos| !protected[pos.to_nd_index()])
        .collect();

    for _ in 0..limits.decoy_segment_attempts {
        let length = rng.range_inclusive(2, 4);
        let &first = rng.choose(&free)?;
        let mut chain = alloc::vec![first];

        while chain.len() < length {
            let Some(&tail) = chain.last() else {
                break;
            };
            let options: Vec<_> = board
                .iter_neighbors(tail)
                .map(|(_, pos)| pos)
                .filter(|pos| !protected[pos.to_nd_index()] && !chain.contains(pos))
                .collect();
            match rng.choose(&options) {
                Some(&next) => chain.push(next),
                None => break,
            }
        }

        if chain.len() == length {
            return Some(chain);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_route_board(seed: &str) -> (Board, Route) {
        let route = l_route((0, 0), (5, 5));
        let mut board = Board::new((6, 6), (0, 0), (5, 5));
        lay_route(&mut board, &route);
        let template =
            PuzzleTemplate::new((6, 6), 1, 0, 0.5, 3, Tier::Medium, GemStrategy::OnRoute);
        let mut rng = SeededRng::new(seed);
        fill_decoys(&mut rng, &mut board, &template, &GeneratorLimits::default());
        (board, route)
    }

    #[test]
    fn route_tiles_survive_decoys() {
        let route = l_route((0, 0), (5, 5));
        let mut untouched = Board::new((6, 6), (0, 0), (5, 5));
        lay_route(&mut untouched, &route);

        let (board, _) = solved_route_board("decoys");

        for &pos in &route.cells {
            assert_eq!(board[pos], untouched[pos]);
        }
        assert!(check_connection(&board, (0, 0), (5, 5)).connected);
    }

    #[test]
    fn decoys_are_never_junctions() {
        for seed in ["j1", "j2", "j3"] {
            let (board, route) = solved_route_board(seed);
            for pos in board.iter_positions() {
                if route.cells.contains(&pos) {
                    continue;
                }
                let tile = board[pos];
                assert!(tile.edges.open_count() <= 2);
                assert!(tile.is_well_formed());
                if tile.is_path() {
                    assert!(matches!(tile.id, TileId::Decoy(_)));
                }
            }
        }
    }

    #[test]
    fn free_chain_avoids_protected_cells() {
        let board = Board::new((5, 1), (0, 0), (4, 0));
        let mut protected: Array2<bool> = Array2::default([5, 1]);
        protected[[0, 0]] = true;
        let mut rng = SeededRng::new("chain");

        let chain = find_free_chain(&mut rng, &board, &protected, &GeneratorLimits::default())
            .expect("a row of free cells fits a chain");

        assert!((2..=4).contains(&chain.len()));
        assert!(!chain.contains(&(0, 0)));
        for pair in chain.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }
}
