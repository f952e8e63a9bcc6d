use std::path::{Path, PathBuf};

use crate::chart::renderer::ChartOptions;
use crate::foundation::error::{OverlogError, OverlogResult};
use crate::overlay::composite::Placement;
use crate::sync::anchor::SyncAnchor;

/// Output frame dimensions. Every input stream must match.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A complete overlay job description.
///
/// A job is pure data, deserialized from JSON and validated before anything runs. Example:
///
/// ```json
/// {
///   "videos": ["PICT0002.AVI"],
///   "log": "LOG-13.TXT",
///   "out": "output-scroll.mp4",
///   "sync": [
///     { "video_sec": 16.0, "data_sec": 36.0 },
///     { "video_sec": 1180.0, "data_sec": 926.0 }
///   ],
///   "frame": { "width": 640, "height": 480 },
///   "chart": { "width": 620, "height": 200 }
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OverlayJob {
    /// Input video paths, processed in order.
    pub videos: Vec<PathBuf>,
    /// Instrument log path (`"<time_ms>, <value>"` records).
    pub log: PathBuf,
    /// Output video path (MP4).
    pub out: PathBuf,
    /// Two sync anchors. Video times strictly increase, same for log times; a negative video
    /// time counts back from the end of the full recorded duration.
    pub sync: [SyncAnchor; 2],
    /// Output frame dimensions.
    pub frame: FrameSize,
    /// Chart raster geometry.
    pub chart: ChartOptions,
    /// Chart placement inside the frame. Default: horizontally centered, flush to the bottom.
    #[serde(default)]
    pub placement: Option<Placement>,
}

impl OverlayJob {
    /// Load and parse a job file.
    pub fn from_path(path: &Path) -> OverlogResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OverlogError::config(format!("failed to read job '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            OverlogError::config(format!("failed to parse job '{}': {e}", path.display()))
        })
    }

    /// Check every configuration-level invariant that can be checked without touching the
    /// inputs. Fatal on failure, before any output is produced.
    pub fn validate(&self) -> OverlogResult<()> {
        if self.videos.is_empty() {
            return Err(OverlogError::config("job lists no input videos"));
        }
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(OverlogError::config("frame dimensions must be non-zero"));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(OverlogError::config("chart dimensions must be non-zero"));
        }
        if !(self.chart.half_window_sec > 0.0) {
            return Err(OverlogError::config(
                "chart half_window_sec must be positive",
            ));
        }
        if !(self.chart.y_margin >= 0.0) {
            return Err(OverlogError::config("chart y_margin must be >= 0"));
        }
        self.resolved_placement()?;
        // The video-side ordering can only be checked after negative anchors are resolved
        // against the probed duration; the log side never resolves, so check it now. Anchors
        // that are both start-relative can fail early too.
        if self.sync[1].data_sec <= self.sync[0].data_sec {
            return Err(OverlogError::config(format!(
                "sync anchors must have strictly increasing log times, got {} then {}",
                self.sync[0].data_sec, self.sync[1].data_sec
            )));
        }
        if self.sync[0].video_sec >= 0.0
            && self.sync[1].video_sec >= 0.0
            && self.sync[1].video_sec <= self.sync[0].video_sec
        {
            return Err(OverlogError::config(format!(
                "sync anchors must have strictly increasing video times, got {} then {}",
                self.sync[0].video_sec, self.sync[1].video_sec
            )));
        }
        Ok(())
    }

    /// The effective chart placement, validated against the frame bounds.
    pub fn resolved_placement(&self) -> OverlogResult<Placement> {
        match self.placement {
            Some(p) => {
                p.validate(
                    self.frame.width,
                    self.frame.height,
                    self.chart.width,
                    self.chart.height,
                )?;
                Ok(p)
            }
            None => Placement::bottom_center(
                self.frame.width,
                self.frame.height,
                self.chart.width,
                self.chart.height,
            ),
        }
    }
}
