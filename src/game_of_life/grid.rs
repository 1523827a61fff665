//! Grid representation and neighbor census for Game of Life

use super::cell::Cell;
use super::seeder::Seeder;
use crate::error::{LifeError, LifeResult};
use itertools::{iproduct, Itertools};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows used when no explicit size is configured
pub const DEFAULT_ROWS: usize = 50;
/// Columns used when no explicit size is configured
pub const DEFAULT_COLS: usize = 50;

/// A fixed-size rectangle of cells stored row-major.
///
/// Edges are hard boundaries: positions outside `[0, rows) x [0, cols)` are
/// never counted as neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// A live cell as handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveCell {
    pub row: usize,
    pub col: usize,
    pub lifespan: u32,
}

/// Live-neighbor counts for every cell, taken before a generation mutates
/// the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCensus {
    rows: usize,
    cols: usize,
    counts: Vec<u8>,
}

impl NeighborCensus {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of living neighbors recorded for `(row, col)`
    pub fn living_neighbors(&self, row: usize, col: usize) -> u8 {
        assert!(
            row < self.rows && col < self.cols,
            "coordinates ({}, {}) out of bounds for {}x{} census",
            row, col, self.rows, self.cols
        );
        self.counts[row * self.cols + col]
    }
}

impl Grid {
    /// Create a grid of dead cells
    pub fn new(rows: usize, cols: usize) -> LifeResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::new(); rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Replace every cell with a fresh dead one, keeping the dimensions
    pub fn reset(&mut self) {
        self.cells.fill(Cell::new());
    }

    /// Convert 2D coordinates to the row-major index, panicking when out of range
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "coordinates ({}, {}) out of bounds for {}x{} grid",
            row, col, self.rows, self.cols
        );
        row * self.cols + col
    }

    /// Check that a coordinate lies inside the grid without panicking
    pub fn check_bounds(&self, row: usize, col: usize) -> LifeResult<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row, col)]
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_alive()
    }

    /// Every coordinate in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.rows).cartesian_product(0..self.cols)
    }

    /// Apply a seeding policy to every cell: `true` spawns, `false` kills
    pub fn seed<S: Seeder + ?Sized>(&mut self, seeder: &mut S) {
        for (row, col) in (0..self.rows).cartesian_product(0..self.cols) {
            let idx = row * self.cols + col;
            if seeder.is_alive(row, col) {
                self.cells[idx].spawn();
            } else {
                self.cells[idx].kill();
            }
        }
    }

    /// Spawn the listed cells, leaving every other cell as it was.
    ///
    /// Call [`Grid::reset`] first for a clean pattern.
    pub fn seed_from_coordinates(&mut self, coordinates: &[(usize, usize)]) {
        for &(row, col) in coordinates {
            self.cell_mut(row, col).spawn();
        }
    }

    /// Count living cells in the Moore neighborhood of `(row, col)`
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.index(row, col);

        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&(dr, dc)| !(dr == 0 && dc == 0))
            .filter(|&(dr, dc)| self.is_neighbor_alive(row, col, dr, dc))
            .count() as u8
    }

    fn is_neighbor_alive(&self, row: usize, col: usize, dr: isize, dc: isize) -> bool {
        match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
            (Some(r), Some(c)) if r < self.rows && c < self.cols => {
                self.cells[r * self.cols + c].is_alive()
            }
            _ => false,
        }
    }

    /// Count neighbors for every cell from the current state
    pub fn census(&self) -> NeighborCensus {
        let counts = self
            .coordinates()
            .map(|(row, col)| self.count_live_neighbors(row, col))
            .collect();

        NeighborCensus {
            rows: self.rows,
            cols: self.cols,
            counts,
        }
    }

    /// Live cells with their lifespans, row-major
    pub fn snapshot(&self) -> Vec<LiveCell> {
        self.coordinates()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.is_alive())
            .map(|((row, col), cell)| LiveCell {
                row,
                col,
                lifespan: cell.lifespan(),
            })
            .collect()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.snapshot()
            .into_iter()
            .map(|cell| (cell.row, cell.col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![Cell::new(); DEFAULT_ROWS * DEFAULT_COLS],
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if self.is_alive(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        grid.seed_from_coordinates(live);
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.coordinates().count(), 12);
        assert!(grid.is_empty());

        let default = Grid::default();
        assert_eq!((default.rows(), default.cols()), (DEFAULT_ROWS, DEFAULT_COLS));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = grid_with(
            3,
            3,
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)],
        );

        // Center cell should have 8 neighbors
        assert_eq!(grid.count_live_neighbors(1, 1), 8);

        // Only 2 because center is dead
        assert_eq!(grid.count_live_neighbors(0, 0), 2);
    }

    #[test]
    fn test_neighbor_counting_excludes_self() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(grid.count_live_neighbors(1, 1), 0);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
    }

    #[test]
    fn test_corners_never_wrap() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.seed(&mut |_: usize, _: usize| true);

        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        assert_eq!(grid.count_live_neighbors(3, 3), 3);
        assert_eq!(grid.count_live_neighbors(0, 2), 5);
        assert_eq!(grid.count_live_neighbors(2, 2), 8);

        // A cell on the far edge does not see the opposite edge
        let grid = grid_with(4, 4, &[(0, 3), (3, 0)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_range_access_panics() {
        let grid = Grid::new(2, 2).unwrap();
        grid.count_live_neighbors(2, 0);
    }

    #[test]
    fn test_check_bounds() {
        let grid = Grid::new(2, 3).unwrap();
        assert!(grid.check_bounds(1, 2).is_ok());
        assert_eq!(
            grid.check_bounds(2, 0),
            Err(LifeError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_seed_with_predicate() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.seed_from_coordinates(&[(0, 1)]);

        grid.seed(&mut |row: usize, col: usize| (row + col) % 2 == 0);

        assert_eq!(grid.living_count(), 8);
        assert!(grid.is_alive(0, 0));
        // Predicate overrides prior state
        assert!(!grid.is_alive(0, 1));
    }

    #[test]
    fn test_seed_from_coordinates_does_not_clear() {
        let mut grid = grid_with(3, 3, &[(0, 0)]);
        grid.seed_from_coordinates(&[(2, 2)]);
        assert_eq!(grid.living_cells(), vec![(0, 0), (2, 2)]);

        grid.reset();
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn test_census_matches_neighbor_counts() {
        let grid = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let census = grid.census();

        assert_eq!((census.rows(), census.cols()), (3, 3));
        assert_eq!(census.living_neighbors(0, 1), 3);
        assert_eq!(census.living_neighbors(1, 1), 2);
        assert_eq!(census.living_neighbors(0, 0), 2);
        assert_eq!(census.living_neighbors(1, 0), 1);
    }

    #[test]
    fn test_snapshot_is_row_major() {
        let mut grid = grid_with(3, 3, &[(2, 0), (0, 2), (1, 1)]);
        grid.cell_mut(1, 1).increment_lifespan();

        let snapshot = grid.snapshot();
        assert_eq!(
            snapshot,
            vec![
                LiveCell { row: 0, col: 2, lifespan: 0 },
                LiveCell { row: 1, col: 1, lifespan: 1 },
                LiveCell { row: 2, col: 0, lifespan: 0 },
            ]
        );
    }

    #[test]
    fn test_display() {
        let grid = grid_with(2, 2, &[(0, 0)]);
        assert_eq!(grid.to_string(), "⬛⬜\n⬜⬜\n");
    }
}
