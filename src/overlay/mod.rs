//! Compositing the chart raster into decoded video frames.

pub mod composite;
