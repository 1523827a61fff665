//! Display and output formatting utilities

use crate::game_of_life::{Grid, LiveCell};
use crate::simulation::{Frame, Renderer};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

/// Render colors by age: a cell's lifespan indexes this list, older cells are black
pub const LIFESPAN_PALETTE: [&str; 6] = ["blue", "green", "red", "pink", "orange", "purple"];

/// Color key for a cell that has survived `lifespan` generations
pub fn color_key(lifespan: u32) -> &'static str {
    LIFESPAN_PALETTE
        .get(lifespan as usize)
        .copied()
        .unwrap_or("black")
}

/// Format grids for display
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                output.push(if grid.is_alive(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols() {
                output.push_str(if grid.is_alive(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format a frame, coloring live cells by age
    pub fn format_frame(frame: &Frame, color: bool) -> String {
        let mut output = String::with_capacity(frame.rows * (frame.cols + 1));
        let mut live = frame.cells.iter().peekable();

        for row in 0..frame.rows {
            for col in 0..frame.cols {
                match live.next_if(|cell| cell.row == row && cell.col == col) {
                    Some(cell) => {
                        let glyph = match Color::for_lifespan(cell.lifespan) {
                            Some(c) if color => ColorOutput::paint("●", c),
                            _ => "●".to_string(),
                        };
                        output.push_str(&glyph);
                    }
                    None => output.push('·'),
                }
            }
            output.push('\n');
        }

        output
    }
}

/// A live cell positioned as a circle of radius `r`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedCell {
    pub x: u64,
    pub y: u64,
    pub r: u32,
    pub color_key: &'static str,
    pub lifespan: u32,
    /// Identity that only stays stable while the cell keeps surviving
    pub key: String,
}

impl PlacedCell {
    /// Center a cell in its `2r x 2r` slot
    pub fn from_live_cell(cell: &LiveCell, radius: u32) -> Self {
        let r = u64::from(radius);
        let x = cell.col as u64 * 2 * r + r;
        let y = cell.row as u64 * 2 * r + r;

        Self {
            x,
            y,
            r: radius,
            color_key: color_key(cell.lifespan),
            lifespan: cell.lifespan,
            key: format!("{}i + {}j@{}", x, y, cell.lifespan),
        }
    }
}

/// Redraws the whole grid in the terminal after every generation
pub struct TerminalRenderer<W> {
    out: W,
    color: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: ColorOutput::supports_color(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let body = GridFormatter::format_frame(frame, self.color);
        let clear = if self.color { "\x1b[2J\x1b[H" } else { "" };
        let result = write!(
            self.out,
            "{}Generation {} ({} living)\n{}",
            clear,
            frame.generation,
            frame.cells.len(),
            body
        )
        .and_then(|_| self.out.flush());

        if let Err(err) = result {
            warn!(error = %err, "Failed to draw frame");
        }
    }
}

/// Writes every frame as one JSON line
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        if let Err(err) = write_json_line(&mut self.out, frame) {
            warn!(error = %err, "Failed to write frame");
        }
    }
}

#[derive(Serialize)]
struct LayoutFrame<'a> {
    generation: u64,
    width: u64,
    height: u64,
    circles: &'a [PlacedCell],
}

/// Writes every frame as positioned, colored circles, one JSON line each
pub struct LayoutRenderer<W> {
    out: W,
    radius: u32,
}

impl<W: Write + Send> LayoutRenderer<W> {
    pub fn new(out: W, radius: u32) -> Self {
        Self { out, radius }
    }
}

impl<W: Write + Send> Renderer for LayoutRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let circles: Vec<PlacedCell> = frame
            .cells
            .iter()
            .map(|cell| PlacedCell::from_live_cell(cell, self.radius))
            .collect();
        let diameter = 2 * u64::from(self.radius);
        let layout = LayoutFrame {
            generation: frame.generation,
            width: frame.cols as u64 * diameter,
            height: frame.rows as u64 * diameter,
            circles: &circles,
        };

        if let Err(err) = write_json_line(&mut self.out, &layout) {
            warn!(error = %err, "Failed to write layout");
        }
    }
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            Self::paint(text, color)
        } else {
            text.to_string()
        }
    }

    /// Wrap text in the escape codes for a color unconditionally
    pub fn paint(text: &str, color: Color) -> String {
        format!("\x1b[{}m{}\x1b[0m", color.code(), text)
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }

    /// Closest terminal color for the palette entry of a lifespan; `None` past the end
    pub fn for_lifespan(lifespan: u32) -> Option<Self> {
        match color_key(lifespan) {
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "red" => Some(Color::Red),
            "pink" => Some(Color::Magenta),
            "orange" => Some(Color::Yellow),
            "purple" => Some(Color::Cyan),
            _ => None,
        }
    }
}
