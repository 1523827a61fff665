//! Configuration settings for the Game of Life simulation

use crate::game_of_life::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::game_of_life::{Pattern, DEFAULT_DENSITY};
use crate::simulation::DEFAULT_INTERVAL;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Radius of a rendered cell; cells are spaced two radii apart
    pub cell_radius: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub interval_ms: u64,
    /// Halt after this many generations; run until interrupted when unset
    pub max_generations: Option<u64>,
}

/// How the grid is populated before the first generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SeedConfig {
    Random {
        density: f64,
        #[serde(default)]
        rng_seed: Option<u64>,
    },
    Builtin {
        name: String,
        #[serde(default)]
        row: usize,
        #[serde(default)]
        col: usize,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        row: usize,
        #[serde(default)]
        col: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Colored grid redrawn in the terminal
    Text,
    /// One JSON frame per generation
    Json,
    /// One JSON line of positioned, colored circles per generation
    Layout,
    /// Statistics only
    Quiet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                rows: DEFAULT_ROWS,
                cols: DEFAULT_COLS,
                cell_radius: 10,
            },
            simulation: SimulationConfig {
                interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
                max_generations: None,
            },
            seed: SeedConfig::Random {
                density: DEFAULT_DENSITY,
                rng_seed: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load and validate settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let settings = Self::parse_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read a YAML file without validating it, so overrides can still fix
    /// it up before [`Settings::validate`] runs
    pub fn parse_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            anyhow::bail!("Grid dimensions must be positive, got {}x{}", self.grid.rows, self.grid.cols);
        }

        if self.grid.cell_radius == 0 {
            anyhow::bail!("Cell radius must be positive");
        }

        if self.simulation.interval_ms == 0 {
            anyhow::bail!("Generation interval must be at least 1ms");
        }

        match &self.seed {
            SeedConfig::Random { density, .. } => {
                if !(0.0..=1.0).contains(density) {
                    anyhow::bail!("Seed density must be within [0, 1], got {}", density);
                }
            }
            SeedConfig::Builtin { name, .. } => {
                if Pattern::builtin(name).is_none() {
                    let known: Vec<_> = Pattern::builtin_names().collect();
                    anyhow::bail!("Unknown pattern '{}' (known: {})", name, known.join(", "));
                }
            }
            SeedConfig::File { path, .. } => {
                if !path.exists() {
                    anyhow::bail!("Pattern file does not exist: {}", path.display());
                }
            }
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.simulation.interval_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.simulation.interval_ms = interval_ms;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.max_generations = Some(generations);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }

        // A pattern file wins over a builtin, which wins over random tweaks
        if let Some(ref path) = cli_overrides.pattern_file {
            self.seed = SeedConfig::File {
                path: path.clone(),
                row: cli_overrides.row.unwrap_or(0),
                col: cli_overrides.col.unwrap_or(0),
            };
        } else if let Some(ref name) = cli_overrides.pattern {
            self.seed = SeedConfig::Builtin {
                name: name.clone(),
                row: cli_overrides.row.unwrap_or(0),
                col: cli_overrides.col.unwrap_or(0),
            };
        } else if cli_overrides.density.is_some() || cli_overrides.rng_seed.is_some() {
            let (current_density, current_seed) = match self.seed {
                SeedConfig::Random { density, rng_seed } => (density, rng_seed),
                _ => (DEFAULT_DENSITY, None),
            };
            self.seed = SeedConfig::Random {
                density: cli_overrides.density.unwrap_or(current_density),
                rng_seed: cli_overrides.rng_seed.or(current_seed),
            };
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub interval_ms: Option<u64>,
    pub generations: Option<u64>,
    pub density: Option<f64>,
    pub rng_seed: Option<u64>,
    pub pattern: Option<String>,
    pub pattern_file: Option<PathBuf>,
    pub row: Option<usize>,
    pub col: Option<usize>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.rows, 50);
        assert_eq!(settings.grid.cols, 50);
        assert_eq!(settings.interval(), Duration::from_millis(1));
        assert_eq!(
            settings.seed,
            SeedConfig::Random { density: 0.4, rng_seed: None }
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.rows = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed = SeedConfig::Random { density: 2.0, rng_seed: None };
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed = SeedConfig::Builtin { name: "nope".into(), row: 0, col: 0 };
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed = SeedConfig::File { path: "missing/pattern.txt".into(), row: 0, col: 0 };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.seed = SeedConfig::Builtin { name: "glider".into(), row: 2, col: 3 };
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.seed, settings.seed);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_tagged_seed() {
        let yaml = "
grid: { rows: 10, cols: 12, cell_radius: 4 }
simulation: { interval_ms: 100, max_generations: 20 }
seed: { policy: builtin, name: blinker }
output: { format: layout }
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.simulation.max_generations, Some(20));
        assert_eq!(
            settings.seed,
            SeedConfig::Builtin { name: "blinker".into(), row: 0, col: 0 }
        );
        assert_eq!(settings.output.format, OutputFormat::Layout);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            rows: Some(8),
            interval_ms: Some(250),
            density: Some(0.25),
            ..Default::default()
        });
        assert_eq!(settings.grid.rows, 8);
        assert_eq!(settings.grid.cols, 50);
        assert_eq!(settings.simulation.interval_ms, 250);
        assert_eq!(settings.seed, SeedConfig::Random { density: 0.25, rng_seed: None });

        settings.merge_with_cli(&CliOverrides {
            pattern: Some("block".into()),
            row: Some(1),
            ..Default::default()
        });
        assert_eq!(settings.seed, SeedConfig::Builtin { name: "block".into(), row: 1, col: 0 });
    }

    #[test]
    fn test_parse_file_defers_validation() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("zero.yaml");

        let mut settings = Settings::default();
        settings.grid.rows = 0;
        settings.to_file(&path).unwrap();

        assert!(Settings::from_file(&path).is_err());

        let mut parsed = Settings::parse_file(&path).unwrap();
        assert_eq!(parsed.grid.rows, 0);
        parsed.merge_with_cli(&CliOverrides { rows: Some(5), ..Default::default() });
        assert!(parsed.validate().is_ok());

        std::fs::write(&path, "grid: [not, a, map]").unwrap();
        let err = Settings::parse_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
