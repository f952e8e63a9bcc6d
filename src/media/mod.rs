//! Input video access through the system `ffprobe`/`ffmpeg` binaries.

pub mod probe;
pub mod source;
