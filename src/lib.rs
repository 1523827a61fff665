//! Game of Life Simulation Engine
//!
//! This library advances Conway's Game of Life on a fixed, non-wrapping grid
//! and hands every generation's live cells to a renderer.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{Cell, GameOfLifeRules, Grid, LiveCell};
pub use simulation::{Renderer, Simulation};

use anyhow::Result;

/// Build a simulation from settings and advance it `generations` times
pub fn simulate(settings: &Settings, generations: u64) -> Result<Simulation> {
    let mut simulation = Simulation::from_settings(settings)?;
    for _ in 0..generations {
        simulation.step()?;
    }
    Ok(simulation)
}
