//! Initial-state policies applied to a grid before the first generation

use crate::error::{LifeError, LifeResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that a cell starts alive under the default random policy
pub const DEFAULT_DENSITY: f64 = 0.4;

/// Decides, per coordinate, whether a cell starts alive.
///
/// Any `FnMut(usize, usize) -> bool` closure is a seeder.
pub trait Seeder {
    fn is_alive(&mut self, row: usize, col: usize) -> bool;
}

impl<F> Seeder for F
where
    F: FnMut(usize, usize) -> bool,
{
    fn is_alive(&mut self, row: usize, col: usize) -> bool {
        self(row, col)
    }
}

/// Independent Bernoulli trial per cell
#[derive(Debug, Clone)]
pub struct RandomSeeder {
    density: f64,
    rng: StdRng,
}

impl RandomSeeder {
    /// Seeder drawing from OS entropy
    pub fn new(density: f64) -> LifeResult<Self> {
        Self::validate_density(density)?;
        Ok(Self {
            density,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Reproducible seeder for a fixed RNG seed
    pub fn with_seed(density: f64, seed: u64) -> LifeResult<Self> {
        Self::validate_density(density)?;
        Ok(Self {
            density,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn validate_density(density: f64) -> LifeResult<()> {
        if (0.0..=1.0).contains(&density) {
            Ok(())
        } else {
            Err(LifeError::InvalidDensity(density))
        }
    }
}

impl Seeder for RandomSeeder {
    fn is_alive(&mut self, _row: usize, _col: usize) -> bool {
        self.rng.random_bool(self.density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Grid;

    #[test]
    fn test_density_validation() {
        assert!(RandomSeeder::new(0.0).is_ok());
        assert!(RandomSeeder::new(1.0).is_ok());
        assert_eq!(
            RandomSeeder::new(1.5).unwrap_err(),
            LifeError::InvalidDensity(1.5)
        );
        assert!(RandomSeeder::with_seed(-0.1, 7).is_err());
        assert!(RandomSeeder::new(f64::NAN).is_err());
    }

    #[test]
    fn test_extreme_densities() {
        let mut grid = Grid::new(5, 5).unwrap();

        grid.seed(&mut RandomSeeder::new(1.0).unwrap());
        assert_eq!(grid.living_count(), 25);

        grid.seed(&mut RandomSeeder::new(0.0).unwrap());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut first = Grid::new(20, 20).unwrap();
        let mut second = Grid::new(20, 20).unwrap();

        first.seed(&mut RandomSeeder::with_seed(DEFAULT_DENSITY, 42).unwrap());
        second.seed(&mut RandomSeeder::with_seed(DEFAULT_DENSITY, 42).unwrap());

        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.living_count() < 400);
    }

    #[test]
    fn test_closure_seeder() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut diagonal = |row: usize, col: usize| row == col;
        grid.seed(&mut diagonal);
        assert_eq!(grid.living_cells(), vec![(0, 0), (1, 1), (2, 2)]);
    }
}
