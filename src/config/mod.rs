//! Configuration management for the Game of Life simulation

pub mod settings;

pub use settings::{
    CliOverrides, GridConfig, OutputConfig, OutputFormat, SeedConfig, Settings, SimulationConfig,
};
