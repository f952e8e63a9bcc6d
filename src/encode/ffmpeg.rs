use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{ChannelOrder, FrameIndex, Raster};
use crate::foundation::error::{OverlogError, OverlogResult};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw BGR frames to stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> OverlogResult<()> {
        if !(cfg.fps_hz.is_finite() && cfg.fps_hz > 0.0) {
            return Err(OverlogError::config("ffmpeg sink fps must be positive"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(OverlogError::config(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if cfg.width % 2 != 0 || cfg.height % 2 != 0 {
            return Err(OverlogError::config(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(OverlogError::config(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(OverlogError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "bgr24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{:.6}", cfg.fps_hz),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            OverlogError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| OverlogError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| OverlogError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> OverlogResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| OverlogError::encode("ffmpeg sink not started"))?;
        check_push(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(OverlogError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            OverlogError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> OverlogResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| OverlogError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            OverlogError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| OverlogError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| OverlogError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(OverlogError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // A run that aborts after `begin` drops the sink with the encoder still running;
        // reap it. After a successful `end` the child is already gone and this is a no-op.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}

/// Per-push validation: strictly increasing index, configured geometry, BGR channel order.
fn check_push(
    cfg: &SinkConfig,
    last_idx: Option<FrameIndex>,
    idx: FrameIndex,
    frame: &Raster,
) -> OverlogResult<()> {
    if let Some(last) = last_idx {
        if idx.0 <= last.0 {
            return Err(OverlogError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(OverlogError::encode(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.order != ChannelOrder::Bgr {
        return Err(OverlogError::encode(
            "ffmpeg sink expects BGR frames (declared bgr24 input)",
        ));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> OverlogResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
