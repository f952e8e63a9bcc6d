use crate::foundation::error::{OverlogError, OverlogResult};
use crate::sync::anchor::SyncAnchor;

/// Affine mapping from the video clock to the log clock, derived from two anchor points.
///
/// `map(v1) == d1` and `map(v2) == d2` exactly; everything else is linear interpolation, and
/// extrapolation beyond the anchors is permitted (frames outside the sync window still need a
/// mapped time).
#[derive(Clone, Copy, Debug)]
pub struct TimeMapper {
    v1: f64,
    d1: f64,
    scale: f64,
}

impl TimeMapper {
    /// Build from two resolved anchors.
    ///
    /// Anchors must strictly increase on both timelines; equal video times would divide by
    /// zero and are a configuration error, not a silent NaN.
    pub fn new(a1: SyncAnchor, a2: SyncAnchor) -> OverlogResult<Self> {
        if !(a2.video_sec > a1.video_sec) {
            return Err(OverlogError::config(format!(
                "sync anchors must have strictly increasing video times, got {} then {}",
                a1.video_sec, a2.video_sec
            )));
        }
        if !(a2.data_sec > a1.data_sec) {
            return Err(OverlogError::config(format!(
                "sync anchors must have strictly increasing log times, got {} then {}",
                a1.data_sec, a2.data_sec
            )));
        }
        Ok(Self {
            v1: a1.video_sec,
            d1: a1.data_sec,
            scale: (a2.data_sec - a1.data_sec) / (a2.video_sec - a1.video_sec),
        })
    }

    /// Map a video-timeline position to the log timeline.
    pub fn map(&self, video_sec: f64) -> f64 {
        self.d1 + (video_sec - self.v1) * self.scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/mapper.rs"]
mod tests;
