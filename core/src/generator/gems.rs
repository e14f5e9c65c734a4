use alloc::vec::Vec;

use super::*;

/// Places up to `template.gem_count` gems along `route`, never more than one per four
/// route cells. Returns the positions of any locked spur tiles created.
pub(crate) fn place_gems(
    rng: &mut SeededRng,
    board: &mut Board,
    route: &Route,
    template: &PuzzleTemplate,
) -> Vec<Coord2> {
    let wanted = usize::from(template.gem_count).min(route.len() / 4);
    let mut spurs = Vec::new();
    if wanted == 0 {
        return spurs;
    }

    for index in anchor_indices(rng, route, wanted) {
        let anchor = route.cells[index];
        match template.gem_strategy {
            GemStrategy::Branches => match grow_spur(rng, board, anchor, spurs.len()) {
                Some(spur) => spurs.push(spur),
                None => board[anchor].special = Some(Special::Gem),
            },
            GemStrategy::OnRoute => board[anchor].special = Some(Special::Gem),
        }
    }

    log::debug!("Placed {wanted} gems, {} on spurs", spurs.len());
    spurs
}

/// Route indices to decorate: turn cells first, then evenly spaced cells.
fn anchor_indices(rng: &mut SeededRng, route: &Route, wanted: usize) -> Vec<usize> {
    let last = route.len() - 1;
    let mut chosen = route.turn_indices();
    rng.shuffle(&mut chosen);
    chosen.truncate(wanted);

    if chosen.len() < wanted {
        let stride = (route.len() / (wanted + 1)).max(1);
        let spaced = (1..)
            .map(|k| k * stride)
            .take_while(|&i| i < last)
            .chain(1..last);
        for index in spaced {
            if chosen.len() == wanted {
                break;
            }
            if !chosen.contains(&index) {
                chosen.push(index);
            }
        }
    }

    chosen
}

/// Opens `anchor` towards a free neighbour and puts a locked gem tile there.
fn grow_spur(
    rng: &mut SeededRng,
    board: &mut Board,
    anchor: Coord2,
    ordinal: usize,
) -> Option<Coord2> {
    let free: Vec<_> = board
        .iter_neighbors(anchor)
        .filter(|&(_, pos)| !board[pos].is_path())
        .collect();
    let &(dir, pos) = rng.choose(&free)?;

    board[anchor].edges |= Edges::from(dir);
    board[pos] = Tile {
        id: TileId::GemBranch(ordinal.try_into().unwrap_or(CellCount::MAX)),
        kind: TileKind::Path,
        edges: Edges::from(dir.opposite()),
        special: Some(Special::Gem),
        locked: true,
    };
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(gem_count: u8, gem_strategy: GemStrategy) -> PuzzleTemplate {
        PuzzleTemplate::new((5, 5), 1, gem_count, 0.5, 3, Tier::Easy, gem_strategy)
    }

    fn laid(route: &Route) -> Board {
        let mut board = Board::new((5, 5), route.cells[0], *route.cells.last().unwrap());
        lay_route(&mut board, route);
        board
    }

    #[test]
    fn gems_prefer_turns() {
        let route = l_route((0, 0), (4, 4));
        let mut board = laid(&route);
        let mut rng = SeededRng::new("gems");

        let spurs = place_gems(&mut rng, &mut board, &route, &template(1, GemStrategy::OnRoute));

        assert!(spurs.is_empty());
        assert_eq!(board.gem_positions(), [(4, 0)]);
    }

    #[test]
    fn gem_count_is_capped_by_route_length() {
        let route = l_route((0, 0), (4, 4));
        let mut board = laid(&route);
        let mut rng = SeededRng::new("cap");

        place_gems(&mut rng, &mut board, &route, &template(9, GemStrategy::OnRoute));

        assert_eq!(board.total_gems(), 2);
        assert!(!board[(0, 0)].has_gem());
        assert!(!board[(4, 4)].has_gem());
    }

    #[test]
    fn spurs_are_locked_dead_ends() {
        let route = l_route((0, 0), (4, 4));
        let mut board = laid(&route);
        let mut rng = SeededRng::new("spurs");

        let spurs = place_gems(&mut rng, &mut board, &route, &template(2, GemStrategy::Branches));

        // the corner cell has no free neighbour and keeps its gem on the route
        assert_eq!(spurs, [(3, 1)]);
        assert!(board[(4, 0)].has_gem());
        for spur in spurs {
            let tile = board[spur];
            assert!(tile.locked && tile.has_gem());
            assert_eq!(tile.edges.open_count(), 1);
            assert!(!board.is_movable(spur));
        }
        assert!(connects_all_gems(&board));
    }
}
