//! File I/O operations for Game of Life patterns

use super::{Grid, Pattern};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from a string representation
pub fn parse_pattern_from_string(content: &str) -> Result<Pattern> {
    let lines: Vec<&str> = content.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern file is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::new();

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!("Row {} has length {}, expected {} (all rows must have the same length)",
                         row_idx, line.len(), width);
        }

        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => cells.push((row_idx, col_idx)),
                _ => anyhow::bail!("Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                                 ch, row_idx, col_idx),
            }
        }
    }

    Ok(Pattern {
        rows: lines.len(),
        cols: width,
        cells,
    })
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            result.push(if grid.is_alive(row, col) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Write every built-in pattern as `<name>.txt` into a directory
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for name in Pattern::builtin_names() {
        let Some(pattern) = Pattern::builtin(name) else {
            continue;
        };
        let mut grid = Grid::new(pattern.rows, pattern.cols)?;
        grid.seed_from_coordinates(&pattern.cells);

        save_grid_to_file(&grid, dir.join(format!("{}.txt", name)))
            .with_context(|| format!("Failed to write {}.txt", name))?;
    }

    Ok(())
}
