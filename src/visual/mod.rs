//! Render surface: canvas primitives, bitmap font, palettes and plots.

pub mod canvas;
pub mod colormap;
pub mod font;
pub mod plot;

pub use canvas::Canvas;
pub use colormap::Colormap;
pub use plot::{render, Axes};
