//! Generation stepping and the cooperative scheduling loop
//!
//! A [`Simulation`] owns one grid. It can be advanced by hand with
//! [`Simulation::step`] or handed to a Tokio task with [`Simulation::run`],
//! which performs one step per interval until [`Simulation::halt`] is
//! awaited or the generation limit is reached. The grid is shared with the
//! loop task behind a mutex and only `step` mutates it while the loop is
//! active.
//!
//! Frames leave the lock as owned values. While running they are queued to
//! a dedicated render thread, so a slow renderer never holds up the grid.

use super::renderer::{Frame, NullRenderer, Renderer};
use super::stats::GenerationStats;
use crate::config::{SeedConfig, Settings};
use crate::error::{LifeError, LifeResult};
use crate::game_of_life::{
    load_pattern_from_file, GameOfLifeRules, Grid, LiveCell, Pattern, RandomSeeder, Seeder,
};
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Time between generations when none is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1);

/// Frames waiting for the render thread before new ones are dropped
const RENDER_QUEUE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Result of advancing one generation
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub snapshot: Vec<LiveCell>,
    pub stats: GenerationStats,
}

struct World {
    grid: Grid,
    generation: u64,
    generations: watch::Sender<u64>,
}

impl World {
    fn advance(&mut self) -> StepReport {
        let evolution = GameOfLifeRules::evolve(&mut self.grid);
        self.generation += 1;

        let snapshot = self.grid.snapshot();
        let stats = GenerationStats::new(self.generation, &evolution, &snapshot);
        self.generations.send_replace(self.generation);

        debug!(
            generation = stats.generation,
            living = stats.living_cells,
            births = stats.births,
            deaths = stats.deaths,
            "Generation advanced"
        );

        StepReport { snapshot, stats }
    }

    fn frame(&self, cells: Vec<LiveCell>) -> Frame {
        Frame {
            generation: self.generation,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells,
        }
    }
}

fn lock(world: &Mutex<World>) -> MutexGuard<'_, World> {
    world.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drain `frames` into `renderer` on an OS thread, handing the renderer
/// back through `done` once the sender side is gone
fn spawn_render_thread(
    mut renderer: Box<dyn Renderer>,
    mut frames: mpsc::Receiver<Frame>,
    done: oneshot::Sender<Box<dyn Renderer>>,
) -> LifeResult<()> {
    std::thread::Builder::new()
        .name("renderer".into())
        .spawn(move || {
            while let Some(frame) = frames.blocking_recv() {
                renderer.render(&frame);
            }
            let _ = done.send(renderer);
        })
        .map(|_| ())
        .map_err(|err| LifeError::RenderThread(err.to_string()))
}

struct RunHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
    renderer: oneshot::Receiver<Box<dyn Renderer>>,
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One grid plus the machinery to advance it
pub struct Simulation {
    world: Arc<Mutex<World>>,
    interval: Duration,
    generation_limit: Option<u64>,
    renderer: Box<dyn Renderer>,
    run: Option<RunHandle>,
}

impl Simulation {
    /// Wrap a grid; generations are `interval` apart once running
    pub fn new(grid: Grid, interval: Duration) -> LifeResult<Self> {
        if interval.is_zero() {
            return Err(LifeError::InvalidInterval);
        }

        let (generations, _) = watch::channel(0);
        Ok(Self {
            world: Arc::new(Mutex::new(World {
                grid,
                generation: 0,
                generations,
            })),
            interval,
            generation_limit: None,
            renderer: Box::new(NullRenderer),
            run: None,
        })
    }

    /// Build and seed a simulation from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let mut grid = Grid::new(settings.grid.rows, settings.grid.cols)?;
        match &settings.seed {
            SeedConfig::Random { density, rng_seed } => {
                let mut seeder = match rng_seed {
                    Some(seed) => RandomSeeder::with_seed(*density, *seed)?,
                    None => RandomSeeder::new(*density)?,
                };
                grid.seed(&mut seeder);
            }
            SeedConfig::Builtin { name, row, col } => {
                let pattern = Pattern::builtin(name)
                    .with_context(|| format!("Unknown pattern '{}'", name))?;
                pattern.place(&mut grid, *row, *col)
                    .with_context(|| format!("Pattern '{}' does not fit the grid", name))?;
            }
            SeedConfig::File { path, row, col } => {
                let pattern = load_pattern_from_file(path)?;
                pattern.place(&mut grid, *row, *col)
                    .with_context(|| format!("Pattern {} does not fit the grid", path.display()))?;
            }
        }

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            living = grid.living_count(),
            "Grid seeded"
        );

        Ok(Self::new(grid, settings.interval())?
            .with_generation_limit(settings.simulation.max_generations))
    }

    /// Replace the renderer that receives a frame after every generation
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Make the loop stop by itself once the generation counter reaches
    /// `limit`. Manual steps are not limited.
    pub fn with_generation_limit(mut self, limit: Option<u64>) -> Self {
        self.generation_limit = limit;
        self
    }

    pub fn generation_limit(&self) -> Option<u64> {
        self.generation_limit
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> RunState {
        if self.run.is_some() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Number of generations advanced since creation or the last reset
    pub fn generation(&self) -> u64 {
        lock(&self.world).generation
    }

    /// Live cells as of the latest generation
    pub fn snapshot(&self) -> Vec<LiveCell> {
        lock(&self.world).grid.snapshot()
    }

    /// Read the grid under the simulation's lock
    pub fn with_grid<R>(&self, f: impl FnOnce(&Grid) -> R) -> R {
        f(&lock(&self.world).grid)
    }

    /// Watch the generation counter, e.g. to wait for a number of ticks
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        lock(&self.world).generations.subscribe()
    }

    fn ensure_idle(&self) -> LifeResult<()> {
        if self.is_running() {
            Err(LifeError::NotIdle)
        } else {
            Ok(())
        }
    }

    /// Advance one generation by hand and render it on the caller's thread
    pub fn step(&mut self) -> LifeResult<StepReport> {
        self.ensure_idle()?;
        let (report, frame) = {
            let mut world = lock(&self.world);
            let report = world.advance();
            let frame = world.frame(report.snapshot.clone());
            (report, frame)
        };
        self.renderer.render(&frame);
        Ok(report)
    }

    /// Flip one cell, returning its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        self.ensure_idle()?;
        let mut world = lock(&self.world);
        world.grid.check_bounds(row, col)?;
        Ok(world.grid.cell_mut(row, col).toggle_living())
    }

    /// Clear every cell and restart the generation count
    pub fn reset(&mut self) -> LifeResult<()> {
        self.ensure_idle()?;
        let mut world = lock(&self.world);
        world.grid.reset();
        world.generation = 0;
        world.generations.send_replace(0);
        Ok(())
    }

    /// Apply a seeding policy to every cell
    pub fn seed<S: Seeder + ?Sized>(&mut self, seeder: &mut S) -> LifeResult<()> {
        self.ensure_idle()?;
        lock(&self.world).grid.seed(seeder);
        Ok(())
    }

    /// Spawn the listed cells without clearing the rest of the grid
    pub fn seed_from_coordinates(&mut self, coordinates: &[(usize, usize)]) -> LifeResult<()> {
        self.ensure_idle()?;
        let mut world = lock(&self.world);
        for &(row, col) in coordinates {
            world.grid.check_bounds(row, col)?;
        }
        world.grid.seed_from_coordinates(coordinates);
        Ok(())
    }

    /// Start advancing one generation per interval.
    ///
    /// The first generation happens one interval after the call. The loop
    /// exits on its own once the generation limit is reached; `halt` is
    /// still needed to return to idle. Fails with
    /// [`LifeError::AlreadyRunning`] if the loop is active.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn run(&mut self) -> LifeResult<()> {
        if self.is_running() {
            return Err(LifeError::AlreadyRunning);
        }

        let (frames, frames_rx) = mpsc::channel(RENDER_QUEUE);
        let (done, renderer) = oneshot::channel();
        let current = std::mem::replace(&mut self.renderer, Box::new(NullRenderer));
        spawn_render_thread(current, frames_rx, done)?;

        let (stop, mut stop_rx) = watch::channel(false);
        let world = Arc::clone(&self.world);
        let period = self.interval;
        let start = Instant::now() + period;
        let reached = {
            let limit = self.generation_limit;
            move |generation: u64| limit.is_some_and(|limit| generation >= limit)
        };

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            if reached(lock(&world).generation) {
                return;
            }

            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        let (frame, generation) = {
                            let mut world = lock(&world);
                            let report = world.advance();
                            (world.frame(report.snapshot), report.stats.generation)
                        };

                        if let Err(TrySendError::Full(frame)) = frames.try_send(frame) {
                            debug!(generation = frame.generation, "Render queue full, frame dropped");
                        }
                        if reached(generation) {
                            info!(generation, "Generation limit reached");
                            break;
                        }
                    }
                }
            }
            debug!("Generation loop exited");
        });

        info!(
            interval_ms = period.as_millis() as u64,
            generation = self.generation(),
            limit = ?self.generation_limit,
            "Simulation running"
        );
        self.run = Some(RunHandle { stop, task, renderer });
        Ok(())
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// Once this returns no further generation runs and every queued frame
    /// has been rendered. Halting an idle simulation does nothing.
    pub async fn halt(&mut self) {
        let Some(mut handle) = self.run.take() else {
            return;
        };

        handle.stop.send_replace(true);
        if let Err(err) = (&mut handle.task).await {
            if !err.is_cancelled() {
                warn!(error = %err, "Generation loop ended abnormally");
            }
        }

        match (&mut handle.renderer).await {
            Ok(renderer) => self.renderer = renderer,
            Err(_) => warn!("Render thread exited without returning its renderer"),
        }

        info!(generation = self.generation(), "Simulation halted");
    }
}
