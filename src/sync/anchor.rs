/// A known correspondence between a moment on the video timeline and a moment on the log
/// timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SyncAnchor {
    /// Seconds on the video timeline. A negative value means "offset from the end of the full
    /// recorded duration" and must be resolved through [`SyncAnchor::resolve_from_end`] before
    /// any mapping.
    pub video_sec: f64,
    /// Seconds on the log timeline.
    pub data_sec: f64,
}

impl SyncAnchor {
    /// Resolve a from-the-end video time against the full recorded duration
    /// (`total_frames / avg_fps`). Non-negative video times pass through unchanged. Called
    /// once at setup, before the mapper is built.
    pub fn resolve_from_end(self, total_video_secs: f64) -> Self {
        if self.video_sec < 0.0 {
            Self {
                video_sec: total_video_secs + self.video_sec,
                ..self
            }
        } else {
            self
        }
    }
}
