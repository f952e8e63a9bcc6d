use crate::foundation::error::{OverlogError, OverlogResult};

/// Index of one output frame on the global (all-streams) timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frame rate as reported by the demuxer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor.
    pub fn new(num: u32, den: u32) -> OverlogResult<Self> {
        if num == 0 {
            return Err(OverlogError::config("Fps num must be > 0"));
        }
        if den == 0 {
            return Err(OverlogError::config("Fps den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate in Hz.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Per-pixel color channel storage order of a [`Raster`].
///
/// The chart rasterizer emits RGB; the video decode/encode path runs BGR. The compositor
/// consults this tag instead of hard-coding a swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
}

/// A dense 8-bit, 3-channel pixel grid, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel storage order of `data`.
    pub order: ChannelOrder,
    /// Pixel bytes, `width * height * 3` of them.
    pub data: Vec<u8>,
}

impl Raster {
    /// Byte length of a `width` x `height` 3-channel raster.
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 3
    }

    /// Wrap an existing pixel buffer, validating its length.
    pub fn new(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> OverlogResult<Self> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(OverlogError::config(format!(
                "raster buffer is {} bytes, {}x{}x3 needs {expected}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// A raster filled with one solid color (given in `order`'s channel order).
    pub fn filled(width: u32, height: u32, order: ChannelOrder, px: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(Self::byte_len(width, height));
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            order,
            data,
        }
    }

    /// The three channel bytes at `(x, y)`, in storage order. Panics out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
