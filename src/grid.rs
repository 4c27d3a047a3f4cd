use rand::Rng;
use thiserror::Error;

use crate::GridOffset;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Pattern has no rows")]
    Empty,

    #[error("Row {row} is {len} cells wide, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("Unexpected '{got}' at ({row}, {col}), expected '#' or '.'")]
    InvalidCell { row: usize, col: usize, got: char },
}

/// A fixed size, square board of cells.
///
/// Cells are stored row major. The side length is decided at construction and never changes, so
/// every `(row, col)` in `[0, size)` always maps to a definite cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty `size` by `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Create a grid where each cell is independently alive with probability `density`.
    ///
    /// `density` is clamped to `[0, 1]`.
    pub fn random<R: Rng>(size: usize, density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..size * size).map(|_| rng.random_bool(density)).collect();

        Self { size, cells }
    }

    /// Build a grid from pattern rows, using `#` for alive and `.` for dead. The pattern must be
    /// square.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = Self::new(size);

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(GridError::NotSquare { row, len, size });
            }

            for (col, c) in line.chars().enumerate() {
                grid.cells[row * size + col] = match c {
                    '#' => true,
                    '.' => false,
                    got => return Err(GridError::InvalidCell { row, col, got }),
                };
            }
        }

        Ok(grid)
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// The state of the cell at `(row, col)`, or `None` if it lies outside the grid.
    pub fn get(&self, row: GridOffset, col: GridOffset) -> Option<bool> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Like [`Grid::get`], but anything outside of the grid reads as dead.
    pub fn is_alive(&self, row: GridOffset, col: GridOffset) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Set the cell at `(row, col)`. Returns whether the coordinates were on the grid.
    pub fn set(&mut self, row: GridOffset, col: GridOffset, alive: bool) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };

        self.cells[i] = alive;
        true
    }

    /// Flip the cell at `(row, col)`. Returns whether the coordinates were on the grid.
    pub fn toggle(&mut self, row: GridOffset, col: GridOffset) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };

        self.cells[i] = !self.cells[i];
        true
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // `chunks` rejects a zero chunk size
        self.cells.chunks(self.size.max(1))
    }

    /// Iterate over the `(row, col)` coordinates of every live cell, in row major order.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.size, i % self.size))
    }

    fn index(&self, row: GridOffset, col: GridOffset) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;

        if row >= self.size || col >= self.size {
            return None;
        }

        Some(row * self.size + col)
    }
}
