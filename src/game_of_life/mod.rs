//! Game of Life core functionality

pub mod cell;
pub mod grid;
pub mod io;
pub mod patterns;
pub mod rules;
pub mod seeder;

pub use cell::Cell;
pub use grid::{Grid, LiveCell, NeighborCensus};
pub use io::{create_example_patterns, load_pattern_from_file, save_grid_to_file};
pub use patterns::Pattern;
pub use rules::{Action, Evolution, GameOfLifeRules};
pub use seeder::{RandomSeeder, Seeder, DEFAULT_DENSITY};
