//! Command-line driver for the Game of Life simulation engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life_engine::{
    config::{CliOverrides, OutputFormat, SeedConfig, Settings},
    game_of_life::{create_example_patterns, save_grid_to_file},
    simulation::{NullRenderer, Renderer, Simulation},
    utils::{ColorOutput, GridFormatter, JsonRenderer, LayoutRenderer, TerminalRenderer},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Conway's Game of Life simulation engine")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation loop, rendering every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Advance a fixed number of generations and print the result
    Step {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Save the final grid as a pattern file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Print statistics for every generation
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

/// Grid size and seeding overrides shared by `run` and `step`
#[derive(Args, Debug, Default)]
struct GridArgs {
    /// Number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Probability that a cell starts alive
    #[arg(long)]
    density: Option<f64>,

    /// Fixed RNG seed for reproducible random grids
    #[arg(long)]
    seed: Option<u64>,

    /// Built-in pattern to place instead of a random grid
    #[arg(short, long)]
    pattern: Option<String>,

    /// Pattern file to place instead of a random grid
    #[arg(long)]
    pattern_file: Option<PathBuf>,

    /// Row of the pattern's top-left corner
    #[arg(long)]
    row: Option<usize>,

    /// Column of the pattern's top-left corner
    #[arg(long)]
    col: Option<usize>,
}

impl GridArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rows: self.rows,
            cols: self.cols,
            density: self.density,
            rng_seed: self.seed,
            pattern: self.pattern.clone(),
            pattern_file: self.pattern_file.clone(),
            row: self.row,
            col: self.col,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Run { verbose, .. } | Commands::Step { verbose, .. } => *verbose,
        Commands::Setup { .. } => false,
    };
    init_logging(verbose);

    match cli.command {
        Commands::Run { config, grid, interval, generations, format, verbose: _ } => {
            let overrides = CliOverrides {
                interval_ms: interval,
                generations,
                format,
                ..grid.overrides()
            };
            run_command(config, overrides).await
        }
        Commands::Step { config, grid, generations, save, verbose } => {
            step_command(config, grid.overrides(), generations, save, verbose)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

/// Log to stderr so stdout stays free for rendered frames
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::parse_file(config_path)?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    Ok(settings)
}

fn renderer_for(settings: &Settings) -> Box<dyn Renderer> {
    match settings.output.format {
        OutputFormat::Text => Box::new(TerminalRenderer::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonRenderer::new(std::io::stdout())),
        OutputFormat::Layout => {
            Box::new(LayoutRenderer::new(std::io::stdout(), settings.grid.cell_radius))
        }
        OutputFormat::Quiet => Box::new(NullRenderer),
    }
}

async fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;

    let mut simulation = Simulation::from_settings(&settings)
        .context("Failed to create simulation")?
        .with_renderer(renderer_for(&settings));
    let mut generations = simulation.subscribe();

    let start_time = Instant::now();
    simulation.run()?;

    let limit = settings.simulation.max_generations;
    tokio::select! {
        reached = async {
            match limit {
                Some(limit) => generations.wait_for(|g| *g >= limit).await.map(|_| ()),
                None => std::future::pending().await,
            }
        } => {
            reached.context("Generation loop stopped unexpectedly")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted");
        }
    }

    simulation.halt().await;

    let living = simulation.with_grid(|grid| grid.living_count());
    eprintln!("{}", ColorOutput::success(&format!(
        "Stopped after {} generations in {:.3}s ({} living cells)",
        simulation.generation(),
        start_time.elapsed().as_secs_f64(),
        living
    )));

    Ok(())
}

fn step_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    generations: u64,
    save: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let mut simulation = Simulation::from_settings(&settings)
        .context("Failed to create simulation")?;

    println!("Initial Grid:");
    println!("{}", simulation.with_grid(GridFormatter::format_grid_with_coords));

    let mut last = None;
    for _ in 0..generations {
        let report = simulation.step()?;
        if verbose {
            println!("{}", report.stats);
        }
        last = Some(report.stats);
    }

    println!("After {} generation(s):", simulation.generation());
    println!("{}", simulation.with_grid(GridFormatter::format_grid_with_coords));
    if let Some(stats) = last {
        println!("{}", ColorOutput::info(&stats.to_string()));
    }

    if let Some(path) = save {
        simulation.with_grid(|grid| save_grid_to_file(grid, &path))?;
        println!("{}", ColorOutput::success(&format!("Saved final grid to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Blinker oscillating in the middle of a small grid
    let mut blinker = Settings::default();
    blinker.grid.rows = 5;
    blinker.grid.cols = 5;
    blinker.simulation.interval_ms = 500;
    blinker.simulation.max_generations = Some(10);
    blinker.seed = SeedConfig::Builtin { name: "blinker".into(), row: 1, col: 1 };
    blinker.to_file(&examples_dir.join("blinker.yaml"))?;

    // Glider loaded from the pattern directory
    let mut glider = Settings::default();
    glider.grid.rows = 20;
    glider.grid.cols = 20;
    glider.simulation.interval_ms = 100;
    glider.simulation.max_generations = Some(60);
    glider.seed = SeedConfig::File { path: pattern_dir.join("glider.txt"), row: 1, col: 1 };
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    // Reproducible random soup
    let mut soup = Settings::default();
    soup.simulation.interval_ms = 50;
    soup.seed = SeedConfig::Random { density: 0.4, rng_seed: Some(42) };
    soup.to_file(&examples_dir.join("soup.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/examples/blinker.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_engine",
            "run",
            "--config", "test.yaml",
            "--generations", "5",
            "--pattern", "glider",
            "--format", "json",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life_engine", "step", "--rows", "10", "-g", "3"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life_engine", "run", "--format", "svg"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());

        let glider = Settings::from_file(&temp_dir.path().join("config/examples/glider.yaml"));
        assert!(glider.is_ok());
    }

    #[test]
    fn test_step_command_saves_grid() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("final.txt");
        let overrides = CliOverrides {
            rows: Some(3),
            cols: Some(3),
            pattern: Some("blinker".into()),
            ..Default::default()
        };

        step_command(temp_dir.path().join("missing.yaml"), overrides, 1, Some(out.clone()), false)
            .unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "010\n010\n010\n");
    }

    #[test]
    fn test_load_settings_overrides_before_validation() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let mut invalid = Settings::default();
        invalid.simulation.interval_ms = 0;
        invalid.to_file(&path).unwrap();

        assert!(load_settings(&path, &CliOverrides::default()).is_err());

        let overrides = CliOverrides { interval_ms: Some(20), ..Default::default() };
        let settings = load_settings(&path, &overrides).unwrap();
        assert_eq!(settings.simulation.interval_ms, 20);
    }
}
