//! Per-generation statistics

use crate::game_of_life::{Evolution, LiveCell};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub living_cells: usize,
    pub births: usize,
    pub deaths: usize,
    pub oldest_lifespan: u32,
    pub mean_lifespan: f64,
}

impl GenerationStats {
    pub fn new(generation: u64, evolution: &Evolution, snapshot: &[LiveCell]) -> Self {
        let oldest_lifespan = snapshot.iter().map(|cell| cell.lifespan).max().unwrap_or(0);
        let mean_lifespan = if snapshot.is_empty() {
            0.0
        } else {
            snapshot.iter().map(|cell| f64::from(cell.lifespan)).sum::<f64>() / snapshot.len() as f64
        };

        Self {
            generation,
            living_cells: snapshot.len(),
            births: evolution.births,
            deaths: evolution.deaths,
            oldest_lifespan,
            mean_lifespan,
        }
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {}: {} living (+{} / -{}), oldest {}, mean age {:.2}",
            self.generation,
            self.living_cells,
            self.births,
            self.deaths,
            self.oldest_lifespan,
            self.mean_lifespan
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{GameOfLifeRules, Grid};

    #[test]
    fn test_stats_from_blinker() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.seed_from_coordinates(&[(1, 0), (1, 1), (1, 2)]);

        let evolution = GameOfLifeRules::evolve(&mut grid);
        let stats = GenerationStats::new(1, &evolution, &grid.snapshot());

        assert_eq!(stats.living_cells, 3);
        assert_eq!((stats.births, stats.deaths), (2, 2));
        assert_eq!(stats.oldest_lifespan, 1);
        assert!((stats.mean_lifespan - 1.0 / 3.0).abs() < 1e-9);
        assert!(stats.to_string().starts_with("Generation 1: 3 living"));
    }
}
