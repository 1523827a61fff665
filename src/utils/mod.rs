//! Output helpers and renderers for the CLI

pub mod display;

pub use display::{
    color_key, Color, ColorOutput, GridFormatter, JsonRenderer, LayoutRenderer, PlacedCell,
    TerminalRenderer,
};
