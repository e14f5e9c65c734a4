use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of tiles plus the two endpoint positions.
///
/// The grid is indexed `[x, y]`, so its ndarray shape is `(cols, rows)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
    start: Coord2,
    goal: Coord2,
}

impl Board {
    /// All-empty board. Endpoint tiles are filled in by the generator.
    pub fn new(size: Coord2, start: Coord2, goal: Coord2) -> Self {
        Self {
            tiles: Array2::from_elem(size.to_nd_index(), Tile::EMPTY),
            start,
            goal,
        }
    }

    pub fn from_tiles(tiles: Array2<Tile>, start: Coord2, goal: Coord2) -> Result<Self> {
        let board = Self { tiles, start, goal };
        board.validate_coords(start)?;
        board.validate_coords(goal)?;
        if start == goal {
            return Err(PuzzleError::InvalidCoords);
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn cols(&self) -> Coord {
        self.size().0
    }

    pub fn rows(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (cols, rows) = self.size();
        mult(cols, rows)
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (cols, rows) = self.size();
        (0..cols).flat_map(move |x| (0..rows).map(move |y| (x, y)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// Path tiles that a swap may relocate: not an endpoint and not locked.
    pub fn is_movable(&self, coords: Coord2) -> bool {
        if coords == self.start || coords == self.goal {
            return false;
        }
        self.tile(coords)
            .is_some_and(|tile| tile.is_path() && !tile.locked && !tile.is_endpoint())
    }

    pub fn movable_positions(&self) -> Vec<Coord2> {
        self.iter_positions()
            .filter(|&pos| self.is_movable(pos))
            .collect()
    }

    pub fn swap(&mut self, a: Coord2, b: Coord2) {
        self.tiles.swap(a.to_nd_index(), b.to_nd_index());
    }

    pub fn total_gems(&self) -> CellCount {
        self.tiles
            .iter()
            .filter(|tile| tile.has_gem())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn gem_positions(&self) -> Vec<Coord2> {
        self.iter_positions()
            .filter(|&pos| self[pos].has_gem())
            .collect()
    }

    /// Both endpoint tiles are path tiles with at least one open side.
    pub fn endpoints_connectable(&self) -> bool {
        [self.start, self.goal]
            .into_iter()
            .all(|pos| self.tile(pos).is_some_and(Tile::is_connectable))
    }

    /// Puts the start and goal identities back on the endpoint positions.
    pub fn restamp_endpoints(&mut self) {
        let (start, goal) = (self.start, self.goal);
        let cols = CellCount::from(self.cols());
        for pos in self.iter_positions() {
            let tile = &mut self[pos];
            if tile.is_endpoint() && pos != start && pos != goal {
                log::warn!("Endpoint identity {} found away from its cell at {:?}", tile.id, pos);
                tile.id = TileId::Route(CellCount::from(pos.0) + CellCount::from(pos.1) * cols);
            }
        }
        self[start].id = TileId::Start;
        self[goal].id = TileId::Goal;
    }

    /// Structural check used before trusting a board from outside the generator.
    pub fn validate(&self) -> Result<()> {
        if self.tiles.is_empty() {
            return Err(PuzzleError::InvalidBoardShape);
        }
        self.validate_coords(self.start)?;
        self.validate_coords(self.goal)?;
        if self.start == self.goal {
            return Err(PuzzleError::InvalidCoords);
        }
        if !self.tiles.iter().all(Tile::is_well_formed) {
            return Err(PuzzleError::InvalidBoardShape);
        }
        if !self.endpoints_connectable() {
            return Err(PuzzleError::BrokenSnapshot);
        }
        Ok(())
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.tiles[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.tiles[(x as usize, y as usize)]
    }
}

/// Builds a board from a compact picture, one string per row.
///
/// Box-drawing characters (`─ │ ┌ ┐ └ ┘ ├ ┤ ┬ ┴ ┼`, dead ends `╴ ╶ ╵ ╷`) are path
/// tiles. `S`/`G` mark start and goal, `*` a gem tile and `#` a locked gem spur; these
/// open towards every neighbouring path tile that opens back at them. `S`, `G` and `*`
/// also join each other when adjacent.
#[cfg(test)]
pub(crate) fn board_from_rows(rows: &[&str]) -> Board {
    use alloc::vec;

    fn edges_for(ch: char) -> Edges {
        match ch {
            '─' => Edges::EAST | Edges::WEST,
            '│' => Edges::NORTH | Edges::SOUTH,
            '┌' => Edges::SOUTH | Edges::EAST,
            '┐' => Edges::SOUTH | Edges::WEST,
            '└' => Edges::NORTH | Edges::EAST,
            '┘' => Edges::NORTH | Edges::WEST,
            '├' => Edges::NORTH | Edges::SOUTH | Edges::EAST,
            '┤' => Edges::NORTH | Edges::SOUTH | Edges::WEST,
            '┬' => Edges::SOUTH | Edges::EAST | Edges::WEST,
            '┴' => Edges::NORTH | Edges::EAST | Edges::WEST,
            '┼' => Edges::all(),
            '╴' => Edges::WEST,
            '╶' => Edges::EAST,
            '╵' => Edges::NORTH,
            '╷' => Edges::SOUTH,
            _ => Edges::empty(),
        }
    }

    let grid: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
    let height = grid.len();
    let width = grid[0].len();
    let mut tiles = Array2::from_elem([width, height], Tile::EMPTY);
    let mut start = (0, 0);
    let mut goal = (0, 0);
    let mut markers = vec![];

    for (y, row) in grid.iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            let pos = (x as Coord, y as Coord);
            match ch {
                ' ' | '.' => {}
                'S' | 'G' | '*' | '#' => markers.push((pos, ch)),
                other => {
                    let id = TileId::Route((x + y * width) as CellCount);
                    tiles[[x, y]] = Tile::path(id, edges_for(other));
                }
            }
        }
    }

    for &(pos, ch) in &markers {
        let (x, y) = (pos.0 as usize, pos.1 as usize);
        let mut edges = Edges::empty();
        for (dir, next) in NeighborIter::new(pos, (width as Coord, height as Coord)) {
            let neighbor_marker = markers.iter().find(|&&(p, _)| p == next).map(|&(_, c)| c);
            let joins_marker = ch != '#' && matches!(neighbor_marker, Some('S' | 'G' | '*'));
            if joins_marker || tiles[next.to_nd_index()].edges.is_open(dir.opposite()) {
                edges |= Edges::from(dir);
            }
        }
        let mut tile = Tile::path(TileId::Route((x + y * width) as CellCount), edges);
        match ch {
            'S' => {
                tile.id = TileId::Start;
                start = pos;
            }
            'G' => {
                tile.id = TileId::Goal;
                goal = pos;
            }
            '*' => tile.special = Some(Special::Gem),
            _ => {
                tile.special = Some(Special::Gem);
                tile.locked = true;
                tile.id = TileId::GemBranch((x + y * width) as CellCount);
            }
        }
        tiles[[x, y]] = tile;
    }

    Board::from_tiles(tiles, start, goal).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movable_excludes_endpoints_locked_and_empty() {
        let board = board_from_rows(&["S┬┐", ".#│", "G─┘"]);

        assert!(!board.is_movable((0, 0)));
        assert!(!board.is_movable((0, 2)));
        assert!(!board.is_movable((0, 1)));
        assert!(!board.is_movable((1, 1)));
        assert!(board.is_movable((1, 0)));
        assert_eq!(board.movable_positions().len(), 5);
    }

    #[test]
    fn validate_rejects_closed_goal() {
        let mut board = board_from_rows(&["S─G"]);
        assert_eq!(board.validate(), Ok(()));

        board[(2, 0)].edges = Edges::empty();

        assert_eq!(board.validate(), Err(PuzzleError::BrokenSnapshot));
    }

    #[test]
    fn restamp_moves_identity_back_to_endpoint_cells() {
        let mut board = board_from_rows(&["S──G"]);
        board.swap((0, 0), (1, 0));

        board.restamp_endpoints();

        assert_eq!(board[(0, 0)].id, TileId::Start);
        assert_ne!(board[(1, 0)].id, TileId::Start);
        assert_eq!(board[(3, 0)].id, TileId::Goal);
    }
}
