//! Game of Life rules implementation

use super::cell::Cell;
use super::grid::{Grid, NeighborCensus};

/// What happens to a cell at the end of a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Underpopulation or overpopulation
    Kill,
    /// Birth
    Spawn,
    /// Survival; the cell ages by one generation
    IncrementLifespan,
    /// Stays dead
    Nothing,
}

impl Action {
    pub fn apply(self, cell: &mut Cell) {
        match self {
            Action::Kill => cell.kill(),
            Action::Spawn => cell.spawn(),
            Action::IncrementLifespan => {
                cell.increment_lifespan();
            }
            Action::Nothing => {}
        }
    }
}

/// Births and deaths applied by one generation, along with the census it
/// was computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    pub census: NeighborCensus,
    pub births: usize,
    pub deaths: usize,
}

/// Game of Life rules engine (B3/S23)
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Decide the next action for a cell given its state and live-neighbor count
    pub fn decide(alive: bool, living_neighbors: u8) -> Action {
        match (alive, living_neighbors) {
            (true, 0..=1) => Action::Kill,
            (true, 2..=3) => Action::IncrementLifespan,
            (true, _) => Action::Kill,
            (false, 3) => Action::Spawn,
            (false, _) => Action::Nothing,
        }
    }

    /// Check if a cell should be alive in the next generation
    pub fn should_be_alive(alive: bool, living_neighbors: u8) -> bool {
        matches!(
            Self::decide(alive, living_neighbors),
            Action::Spawn | Action::IncrementLifespan
        )
    }

    /// Advance the grid one generation in place.
    ///
    /// The whole census is taken before any cell changes, so every cell sees
    /// its neighbors as they were at the start of the generation.
    pub fn evolve(grid: &mut Grid) -> Evolution {
        let census = grid.census();
        let mut births = 0;
        let mut deaths = 0;

        for (row, col) in grid.coordinates() {
            let cell = grid.cell_mut(row, col);
            let action = Self::decide(cell.is_alive(), census.living_neighbors(row, col));
            match action {
                Action::Spawn => births += 1,
                Action::Kill => deaths += 1,
                _ => {}
            }
            action.apply(cell);
        }

        Evolution {
            census,
            births,
            deaths,
        }
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(grid: &mut Grid, generations: usize) {
        for _ in 0..generations {
            Self::evolve(grid);
        }
    }

    /// Get the maximum possible neighbor count for any cell
    pub fn max_neighbor_count() -> u8 {
        8
    }
}
