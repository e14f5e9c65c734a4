use tilelink_core::{Board, Edges, StarRating, Tile, TileId};

/// Box-drawing character for a tile's open sides.
pub fn glyph(tile: &Tile) -> char {
    if !tile.is_path() {
        return '·';
    }
    match tile.id {
        TileId::Start => return 'S',
        TileId::Goal => return 'G',
        _ => {}
    }
    if tile.has_gem() {
        return if tile.locked { '#' } else { '*' };
    }

    let open = |side| tile.edges.contains(side);
    match (
        open(Edges::NORTH),
        open(Edges::SOUTH),
        open(Edges::EAST),
        open(Edges::WEST),
    ) {
        (false, false, false, false) => 'o',
        (true, false, false, false) => '╵',
        (false, true, false, false) => '╷',
        (false, false, true, false) => '╶',
        (false, false, false, true) => '╴',
        (true, true, false, false) => '│',
        (false, false, true, true) => '─',
        (false, true, true, false) => '┌',
        (false, true, false, true) => '┐',
        (true, false, true, false) => '└',
        (true, false, false, true) => '┘',
        (true, true, true, false) => '├',
        (true, true, false, true) => '┤',
        (false, true, true, true) => '┬',
        (true, false, true, true) => '┴',
        (true, true, true, true) => '┼',
    }
}

pub fn board_rows(board: &Board) -> Vec<String> {
    (0..board.rows())
        .map(|y| (0..board.cols()).map(|x| glyph(&board[(x, y)])).collect())
        .collect()
}

pub fn rating_line(rating: &StarRating, moves: u32, gems: u16) -> String {
    let stars: String = (0..3)
        .map(|i| if i < rating.stars { '★' } else { '☆' })
        .collect();
    format!(
        "{stars}  moves {moves} (3★ ≤ {}, 2★ ≤ {})  gems {gems}/{}",
        rating.max_moves_for_3_stars, rating.max_moves_for_2_stars, rating.total_gems
    )
}
