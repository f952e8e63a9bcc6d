use std::path::{Path, PathBuf};

use crate::foundation::core::Fps;
use crate::foundation::error::{OverlogError, OverlogResult};

/// Metadata for one input video stream, collected before any decoding.
#[derive(Clone, Debug)]
pub struct VideoStreamMeta {
    /// Source file path.
    pub path: PathBuf,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Stream frame rate.
    pub fps: Fps,
    /// Total frame count.
    pub frame_count: u64,
}

impl VideoStreamMeta {
    /// Nominal stream duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 * self.fps.frame_duration_secs()
    }
}

/// Probe one input file with `ffprobe` and extract the video stream's metadata.
pub fn probe_stream(path: &Path) -> OverlogResult<VideoStreamMeta> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| OverlogError::load(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(OverlogError::load(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| OverlogError::load(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            OverlogError::load(format!("no video stream found in '{}'", path.display()))
        })?;
    let width = video_stream
        .width
        .ok_or_else(|| OverlogError::load("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| OverlogError::load("missing video height from ffprobe"))?;

    let (fps_num, fps_den) = parse_ff_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| OverlogError::load("invalid video r_frame_rate"))?;
    let fps = Fps::new(fps_num, fps_den)
        .map_err(|_| OverlogError::load(format!("'{}' reports a zero frame rate", path.display())))?;

    let duration_secs = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let frame_count = resolve_frame_count(video_stream.nb_frames.as_deref(), duration_secs, fps)
        .ok_or_else(|| {
            OverlogError::load(format!(
                "cannot determine frame count for '{}'",
                path.display()
            ))
        })?;

    Ok(VideoStreamMeta {
        path: path.to_path_buf(),
        width,
        height,
        fps,
        frame_count,
    })
}

/// Frame count from the stream's `nb_frames` when present, else derived from the container
/// duration and the frame rate.
fn resolve_frame_count(nb_frames: Option<&str>, duration_secs: f64, fps: Fps) -> Option<u64> {
    if let Some(n) = nb_frames.and_then(|s| s.trim().parse::<u64>().ok()) {
        if n > 0 {
            return Some(n);
        }
    }
    let derived = (duration_secs * fps.as_f64()).round();
    if derived >= 1.0 { Some(derived as u64) } else { None }
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let num = parts.next()?.trim().parse::<u32>().ok()?;
    let den = parts.next()?.trim().parse::<u32>().ok()?;
    if den == 0 {
        return None;
    }
    Some((num, den))
}
