use crate::GridOffset;
use crate::grid::Grid;
use crate::rule_set::B3S23;

/// Offsets of the Moore neighborhood, as `(row, col)`
const NEIGHBORHOOD: [(GridOffset, GridOffset); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count the live cells adjacent to `(row, col)`, diagonals included.
///
/// The universe is bounded: anything past the edge of the grid is dead, there is no wraparound.
pub fn count_live_neighbors(grid: &Grid, row: GridOffset, col: GridOffset) -> u8 {
    NEIGHBORHOOD
        .iter()
        .filter(|&&(dr, dc)| {
            match (row.checked_add(dr), col.checked_add(dc)) {
                (Some(r), Some(c)) => grid.is_alive(r, c),
                _ => false,
            }
        })
        .count() as u8
}

/// Compute the next generation of `grid`.
///
/// Every cell reads the previous generation only: the result is built in a fresh grid and `grid`
/// is left untouched.
pub fn step(grid: &Grid) -> Grid {
    let size = grid.size();
    let mut next = Grid::new(size);

    // Grids are far smaller than `GridOffset::MAX` on a side, but don't index with a wrapped value
    let Ok(side) = GridOffset::try_from(size) else {
        return next;
    };

    for row in 0..side {
        for col in 0..side {
            let alive = grid.is_alive(row, col);
            let neighbors = count_live_neighbors(grid, row, col);

            if B3S23.next(alive, neighbors) {
                next.set(row, col, true);
            }
        }
    }

    next
}
