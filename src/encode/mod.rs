//! Encoding sinks.
//!
//! Sinks consume composited frames in timeline order; the pipeline pushes one frame per
//! processed input frame and finalizes the sink exactly once.

pub mod ffmpeg;
pub mod sink;
