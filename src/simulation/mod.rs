//! Simulation orchestration: stepping, scheduling and render hand-off

pub mod renderer;
pub mod runner;
pub mod stats;

pub use renderer::{Frame, NullRenderer, Renderer};
pub use runner::{RunState, Simulation, StepReport, DEFAULT_INTERVAL};
pub use stats::GenerationStats;
