use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::foundation::core::{ChannelOrder, Raster};
use crate::foundation::error::{OverlogError, OverlogResult};
use crate::media::probe::VideoStreamMeta;

/// Sequential access to the decoded frames of one input stream.
///
/// This is the pipeline's whole view of video input: metadata plus a frame-at-a-time read
/// that ends with `Ok(None)`. A decode error mid-stream is recoverable at the stream level
/// (the pipeline truncates the stream and continues with the next).
pub trait FrameSource {
    /// Stream metadata collected at open time.
    fn meta(&self) -> &VideoStreamMeta;

    /// The next decoded frame, or `None` at end of stream.
    fn next_frame(&mut self) -> OverlogResult<Option<Raster>>;
}

/// Decodes frames by streaming rawvideo from a spawned system `ffmpeg`.
///
/// Frames come out as `bgr24`, the decode collaborator's native channel order, and are tagged
/// as such; the compositor reconciles against the RGB chart raster.
pub struct FfmpegFrameSource {
    meta: VideoStreamMeta,
    child: Child,
    stdout: ChildStdout,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    frame_len: usize,
}

impl FfmpegFrameSource {
    /// Spawn the decoder for `meta`'s stream.
    pub fn open(meta: VideoStreamMeta) -> OverlogResult<Self> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-v", "error", "-i"])
            .arg(&meta.path)
            .args(["-f", "rawvideo", "-pix_fmt", "bgr24", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            OverlogError::decode(format!(
                "failed to spawn ffmpeg for '{}' (is it installed and on PATH?): {e}",
                meta.path.display()
            ))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            OverlogError::decode("failed to open ffmpeg stdout (unexpected)")
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            OverlogError::decode("failed to open ffmpeg stderr (unexpected)")
        })?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        let frame_len = Raster::byte_len(meta.width, meta.height);
        Ok(Self {
            meta,
            child,
            stdout,
            stderr_drain: Some(stderr_drain),
            frame_len,
        })
    }
}

impl FrameSource for FfmpegFrameSource {
    fn meta(&self) -> &VideoStreamMeta {
        &self.meta
    }

    fn next_frame(&mut self) -> OverlogResult<Option<Raster>> {
        let mut buf = vec![0u8; self.frame_len];
        let mut filled = 0usize;
        while filled < buf.len() {
            match self.stdout.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(OverlogError::decode(format!(
                        "read from ffmpeg failed for '{}': {e}",
                        self.meta.path.display()
                    )));
                }
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < self.frame_len {
            return Err(OverlogError::decode(format!(
                "truncated frame from '{}': got {filled} of {} bytes",
                self.meta.path.display(),
                self.frame_len
            )));
        }
        Ok(Some(Raster::new(
            self.meta.width,
            self.meta.height,
            ChannelOrder::Bgr,
            buf,
        )?))
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        // The decoder may still be mid-stream when a run truncates; reap it.
        let _ = self.child.kill();
        let _ = self.child.wait();
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}
