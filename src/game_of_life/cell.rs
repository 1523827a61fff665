//! Single grid position state

use serde::{Deserialize, Serialize};

/// A cell tracks whether it is alive and how many generations it has
/// survived since its most recent birth.
///
/// `lifespan` is only meaningful while the cell is alive: `kill` leaves the
/// previous value in place and the next `spawn` resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    alive: bool,
    lifespan: u32,
}

impl Cell {
    /// Create a dead cell
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Bring the cell to life with a fresh lifespan
    pub fn spawn(&mut self) {
        self.lifespan = 0;
        self.alive = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Record one more survived generation and return the new lifespan.
    ///
    /// Saturates at `u32::MAX`.
    pub fn increment_lifespan(&mut self) -> u32 {
        self.lifespan = self.lifespan.saturating_add(1);
        self.lifespan
    }

    /// Flip the living state without touching the lifespan (manual editing)
    pub fn toggle_living(&mut self) -> bool {
        self.alive = !self.alive;
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dead() {
        let cell = Cell::new();
        assert!(!cell.is_alive());
        assert_eq!(cell.lifespan(), 0);
    }

    #[test]
    fn test_spawn_resets_lifespan() {
        let mut cell = Cell::new();
        cell.spawn();
        cell.increment_lifespan();
        cell.increment_lifespan();
        assert_eq!(cell.lifespan(), 2);

        // Spawning an already living cell restarts its count
        cell.spawn();
        assert!(cell.is_alive());
        assert_eq!(cell.lifespan(), 0);
    }

    #[test]
    fn test_kill_keeps_stale_lifespan() {
        let mut cell = Cell::new();
        cell.spawn();
        assert_eq!(cell.increment_lifespan(), 1);
        cell.kill();
        cell.kill();
        assert!(!cell.is_alive());
        assert_eq!(cell.lifespan(), 1);

        cell.spawn();
        assert_eq!(cell.lifespan(), 0);
    }

    #[test]
    fn test_toggle_leaves_lifespan() {
        let mut cell = Cell::new();
        cell.spawn();
        cell.increment_lifespan();

        assert!(!cell.toggle_living());
        assert!(cell.toggle_living());
        assert_eq!(cell.lifespan(), 1);
    }

    #[test]
    fn test_lifespan_saturates() {
        let mut cell = Cell { alive: true, lifespan: u32::MAX - 1 };
        assert_eq!(cell.increment_lifespan(), u32::MAX);
        assert_eq!(cell.increment_lifespan(), u32::MAX);
        assert!(cell.is_alive());
    }
}
