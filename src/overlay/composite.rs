use crate::foundation::core::Raster;
use crate::foundation::error::{OverlogError, OverlogResult};

/// Pixel offset of the chart raster's top-left corner inside the output frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Offset from the frame's left edge.
    pub x: u32,
    /// Offset from the frame's top edge.
    pub y: u32,
}

impl Placement {
    /// Default placement: horizontally centered, flush to the bottom edge.
    pub fn bottom_center(
        frame_w: u32,
        frame_h: u32,
        chart_w: u32,
        chart_h: u32,
    ) -> OverlogResult<Self> {
        if chart_w > frame_w || chart_h > frame_h {
            return Err(OverlogError::config(format!(
                "chart {chart_w}x{chart_h} does not fit a {frame_w}x{frame_h} frame"
            )));
        }
        Ok(Self {
            x: (frame_w - chart_w) / 2,
            y: frame_h - chart_h,
        })
    }

    /// Check that a `chart_w` x `chart_h` overlay at this offset stays inside a
    /// `frame_w` x `frame_h` frame. Checked once at configuration time; compositing relies
    /// on it.
    pub fn validate(
        self,
        frame_w: u32,
        frame_h: u32,
        chart_w: u32,
        chart_h: u32,
    ) -> OverlogResult<()> {
        if u64::from(self.x) + u64::from(chart_w) > u64::from(frame_w)
            || u64::from(self.y) + u64::from(chart_h) > u64::from(frame_h)
        {
            return Err(OverlogError::config(format!(
                "chart {chart_w}x{chart_h} at ({}, {}) exceeds the {frame_w}x{frame_h} frame",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Overwrite the chart-sized region of `frame` at `placement` with `chart`'s pixels.
///
/// Opaque copy, no blending. Channel reconciliation is keyed on the two rasters'
/// [`ChannelOrder`](crate::ChannelOrder) tags: matching orders take a row-wise block copy,
/// differing orders swap R and B per pixel. Pixels outside the target region are untouched.
pub fn composite_onto(
    frame: &mut Raster,
    chart: &Raster,
    placement: Placement,
) -> OverlogResult<()> {
    placement.validate(frame.width, frame.height, chart.width, chart.height)?;

    let fw = frame.width as usize;
    let cw = chart.width as usize;
    let ch = chart.height as usize;
    let ox = placement.x as usize;
    let oy = placement.y as usize;
    let swap = frame.order != chart.order;

    for j in 0..ch {
        let src = &chart.data[j * cw * 3..(j + 1) * cw * 3];
        let dst_start = ((oy + j) * fw + ox) * 3;
        let dst = &mut frame.data[dst_start..dst_start + cw * 3];
        if swap {
            for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                d[0] = s[2];
                d[1] = s[1];
                d[2] = s[0];
            }
        } else {
            dst.copy_from_slice(src);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
