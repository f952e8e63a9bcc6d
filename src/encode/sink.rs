use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::OverlogResult;

/// Configuration provided to a [`FrameSink`] before any frames are pushed.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frame rate in Hz. This is the average of the input streams' rates, so it is a
    /// float by construction.
    pub fps_hz: f64,
}

/// Sink contract for consuming composited frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`FrameIndex`] order
/// across the whole run.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> OverlogResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> OverlogResult<()>;
    /// Called once after the last frame is pushed, even when every stream truncated.
    fn end(&mut self) -> OverlogResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Raster)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Raster)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> OverlogResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> OverlogResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> OverlogResult<()> {
        self.ended = true;
        Ok(())
    }
}
