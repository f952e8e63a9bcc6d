//! Scrolling-window chart rasterization over the `plotters` bitmap backend.

pub mod renderer;
