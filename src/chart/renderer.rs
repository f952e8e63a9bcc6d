use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::foundation::core::{ChannelOrder, Raster};
use crate::foundation::error::{OverlogError, OverlogResult};
use crate::series::cursor::SeriesCursor;
use crate::series::log::TimeSeries;

const SERIES_COLOR: RGBColor = RGBColor(0, 128, 0);
const MARKER_LINE_COLOR: RGBColor = RGBColor(0, 0, 255);
const MARKER_POINT_COLOR: RGBColor = RGBColor(255, 0, 0);
const AXIS_COLOR: RGBColor = RGBColor(160, 160, 160);

/// Chart raster geometry and window parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartOptions {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Half-width of the scrolling x window, in log-timeline seconds.
    #[serde(default = "default_half_window")]
    pub half_window_sec: f64,
    /// Fixed margin added above and below the series' value bounds.
    #[serde(default = "default_y_margin")]
    pub y_margin: f64,
}

fn default_half_window() -> f64 {
    30.0
}

fn default_y_margin() -> f64 {
    5.0
}

/// Renders the scrolling-window chart for arbitrary query times.
///
/// Every call redraws from scratch; there is no retained drawing state, so identical query
/// times over the same series yield pixel-identical rasters. The y range is fixed at
/// construction from the series' value bounds plus [`ChartOptions::y_margin`], so the scale
/// never jitters between frames. No text is drawn, which keeps output independent of host
/// fonts.
pub struct ChartRenderer<'a> {
    series: &'a TimeSeries,
    opts: ChartOptions,
    y_range: (f64, f64),
}

impl<'a> ChartRenderer<'a> {
    /// Build a renderer with a fixed y range derived from `series`.
    pub fn new(series: &'a TimeSeries, opts: ChartOptions) -> OverlogResult<Self> {
        if opts.width == 0 || opts.height == 0 {
            return Err(OverlogError::config("chart dimensions must be non-zero"));
        }
        if !(opts.half_window_sec > 0.0) {
            return Err(OverlogError::config(
                "chart half_window_sec must be positive",
            ));
        }
        if !(opts.y_margin >= 0.0) {
            return Err(OverlogError::config("chart y_margin must be >= 0"));
        }
        let mut y_lo = series.min_value() as f64 - opts.y_margin;
        let mut y_hi = series.max_value() as f64 + opts.y_margin;
        if y_hi <= y_lo {
            // Flat series with zero margin still needs a non-empty axis.
            y_lo -= 1.0;
            y_hi += 1.0;
        }
        Ok(Self {
            series,
            opts,
            y_range: (y_lo, y_hi),
        })
    }

    /// The series this renderer plots.
    pub fn series(&self) -> &'a TimeSeries {
        self.series
    }

    /// Geometry this renderer was built with.
    pub fn options(&self) -> ChartOptions {
        self.opts
    }

    /// Draw the chart for log-time `t`. The highlighted point's value comes from `cursor`.
    ///
    /// Output is a fresh RGB raster of the configured size; the caller composites and drops
    /// it. Any backend failure is a fatal render error.
    pub fn render(&self, t: f64, cursor: &mut SeriesCursor<'_>) -> OverlogResult<Raster> {
        let marker_value = cursor.sample(t) as f64;
        let (w, h) = (self.opts.width, self.opts.height);
        let mut buf = vec![0u8; Raster::byte_len(w, h)];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            self.draw(&root, t, marker_value)
                .map_err(|e| OverlogError::render(format!("chart draw failed at t={t:.3}: {e}")))?;
        }
        Raster::new(w, h, ChannelOrder::Rgb, buf)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        t: f64,
        marker_value: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (y_lo, y_hi) = self.y_range;
        let x_lo = t - self.opts.half_window_sec;
        let x_hi = t + self.opts.half_window_sec;

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .margin(4)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .y_labels(0)
            .axis_style(&AXIS_COLOR)
            .draw()?;

        chart.draw_series(LineSeries::new(self.series.points(), &SERIES_COLOR))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(t, y_lo), (t, y_hi)],
            &MARKER_LINE_COLOR,
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (t, marker_value),
            5,
            MARKER_POINT_COLOR.filled(),
        )))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/renderer.rs"]
mod tests;
