//! Coordinate-list patterns and the built-in library

use super::grid::Grid;
use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};

/// A set of live cells inside a `rows x cols` bounding box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<(usize, usize)>,
}

const BUILTINS: &[(&str, &str)] = &[
    ("blinker", "000\n111\n000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("glider", "00100\n10100\n01100\n00000\n00000\n"),
    ("beacon", "110000\n110000\n001100\n001100\n"),
    ("toad", "0000\n0111\n1110\n0000\n"),
];

impl Pattern {
    /// Build a pattern from rows of '0'/'1' characters
    fn from_rows(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let cells = lines
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '1')
                    .map(move |(col, _)| (row, col))
            })
            .collect();

        Self {
            rows: lines.len(),
            cols: lines.first().map_or(0, |line| line.len()),
            cells,
        }
    }

    /// Look up a built-in pattern by (case-insensitive) name
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTINS
            .iter()
            .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
            .map(|(_, text)| Self::from_rows(text))
    }

    /// Names of every built-in pattern
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|(name, _)| *name)
    }

    /// Cell coordinates shifted by `(row, col)`, checked against `grid`.
    ///
    /// An offset that overflows `usize` is reported as out of bounds, with
    /// the overflowing component saturated.
    pub fn placed_at(&self, grid: &Grid, row: usize, col: usize) -> LifeResult<Vec<(usize, usize)>> {
        self.cells
            .iter()
            .map(|&(r, c)| match (r.checked_add(row), c.checked_add(col)) {
                (Some(r), Some(c)) => grid.check_bounds(r, c).map(|_| (r, c)),
                _ => Err(LifeError::OutOfBounds {
                    row: r.saturating_add(row),
                    col: c.saturating_add(col),
                    rows: grid.rows(),
                    cols: grid.cols(),
                }),
            })
            .collect()
    }

    /// Spawn the pattern onto a grid with its top-left corner at `(row, col)`.
    ///
    /// Every coordinate is checked before any cell is touched. The grid is
    /// not cleared first.
    pub fn place(&self, grid: &mut Grid, row: usize, col: usize) -> LifeResult<()> {
        let coordinates = self.placed_at(grid, row, col)?;
        grid.seed_from_coordinates(&coordinates);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let glider = Pattern::builtin("Glider").unwrap();
        assert_eq!((glider.rows, glider.cols), (5, 5));
        assert_eq!(glider.cells, vec![(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);

        assert!(Pattern::builtin("spaceship").is_none());
        assert_eq!(Pattern::builtin_names().count(), 5);
    }

    #[test]
    fn test_place_with_offset() {
        let mut grid = Grid::new(6, 6).unwrap();
        Pattern::builtin("blinker").unwrap().place(&mut grid, 2, 1).unwrap();
        assert_eq!(grid.living_cells(), vec![(3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_place_rejects_overflow_without_mutation() {
        let mut grid = Grid::new(4, 4).unwrap();
        let blinker = Pattern::builtin("blinker").unwrap();

        let err = blinker.place(&mut grid, 0, 2).unwrap_err();
        assert_eq!(err, LifeError::OutOfBounds { row: 1, col: 4, rows: 4, cols: 4 });
        assert!(grid.is_empty());
    }

    #[test]
    fn test_place_rejects_offset_overflow() {
        let mut grid = Grid::new(4, 4).unwrap();
        let blinker = Pattern::builtin("blinker").unwrap();

        let err = blinker.place(&mut grid, usize::MAX, 0).unwrap_err();
        assert_eq!(err, LifeError::OutOfBounds { row: usize::MAX, col: 0, rows: 4, cols: 4 });

        let err = blinker.place(&mut grid, 0, usize::MAX - 1).unwrap_err();
        assert_eq!(err, LifeError::OutOfBounds { row: 1, col: usize::MAX - 1, rows: 4, cols: 4 });
        assert!(grid.is_empty());
    }
}
