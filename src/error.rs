//! Error types for the simulation engine

use thiserror::Error;

/// Errors raised by the grid, seeders and the simulation loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    /// A grid was requested with a zero-sized dimension.
    #[error("invalid grid dimensions {rows}x{cols}: rows and cols must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A random seeder was given a probability outside `[0, 1]`.
    #[error("invalid seed density {0}: must be within [0, 1]")]
    InvalidDensity(f64),

    /// The generation interval must be non-zero.
    #[error("generation interval must be positive")]
    InvalidInterval,

    /// A coordinate fell outside the grid.
    #[error("coordinates ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// `run` was called while the generation loop was already active.
    #[error("simulation is already running")]
    AlreadyRunning,

    /// A manual edit was attempted while the generation loop was active.
    #[error("simulation must be halted before it can be edited")]
    NotIdle,

    /// The OS refused to start the thread that drains rendered frames.
    #[error("failed to start render thread: {0}")]
    RenderThread(String),
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
