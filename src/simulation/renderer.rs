//! Hand-off point between the engine and whatever draws the grid

use crate::game_of_life::LiveCell;
use serde::Serialize;

/// Everything a renderer learns about one generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub generation: u64,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<LiveCell>,
}

/// Receives a frame after every generation.
///
/// While the loop is running, frames are delivered on a dedicated render
/// thread after the grid lock is released, so implementations may block on
/// I/O without delaying the next generation.
pub trait Renderer: Send {
    fn render(&mut self, frame: &Frame);
}

/// A renderer that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame) {}
}
