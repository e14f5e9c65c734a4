use super::*;

/// Share of endpoint draws placed on the outer ring of the board.
const EDGE_PLACEMENT_CHANCE: f64 = 0.3;

/// Picks start and goal cells at least `max(3, isqrt(area))` apart.
///
/// Falls back to opposite corners when no pair is found within the attempt limit.
pub(crate) fn pick_endpoints(
    rng: &mut SeededRng,
    size: Coord2,
    limits: &GeneratorLimits,
) -> (Coord2, Coord2) {
    let min_distance = mult(size.0, size.1).isqrt().max(3);

    for _ in 0..limits.endpoint_attempts {
        let start = random_cell(rng, size);
        let goal = random_cell(rng, size);
        if start != goal && manhattan(start, goal) >= min_distance {
            return (start, goal);
        }
    }

    log::debug!("Endpoint search exhausted for {size:?}, using corners");
    fallback_endpoints(size)
}

pub(crate) const fn fallback_endpoints((cols, rows): Coord2) -> (Coord2, Coord2) {
    ((0, 0), (cols.saturating_sub(1), rows.saturating_sub(1)))
}

fn random_cell(rng: &mut SeededRng, (cols, rows): Coord2) -> Coord2 {
    let has_interior = cols > 2 && rows > 2;
    if !has_interior || rng.chance(EDGE_PLACEMENT_CHANCE) {
        random_edge_cell(rng, (cols, rows))
    } else {
        let x = rng.range_inclusive(1, usize::from(cols) - 2);
        let y = rng.range_inclusive(1, usize::from(rows) - 2);
        (x as Coord, y as Coord)
    }
}

fn random_edge_cell(rng: &mut SeededRng, (cols, rows): Coord2) -> Coord2 {
    let (cols, rows) = (usize::from(cols), usize::from(rows));
    if rng.chance(0.5) {
        let x = rng.below(cols);
        let y = if rng.chance(0.5) { 0 } else { rows - 1 };
        (x as Coord, y as Coord)
    } else {
        let x = if rng.chance(0.5) { 0 } else { cols - 1 };
        let y = rng.below(rows);
        (x as Coord, y as Coord)
    }
}
