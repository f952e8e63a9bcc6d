//! overlog: composite a scrolling instrument-log chart onto video.
//!
//! The engine synchronizes a video recording's clock with an instrument log's clock via two
//! anchor points, then renders every output frame with a scrolling chart of the log drawn
//! over it. Decoding and encoding go through the system `ffmpeg`; chart rasterization is
//! deterministic, with a fixed y axis computed once per run.
//!
//! A run is described by an [`OverlayJob`] (usually deserialized from JSON) and executed by
//! [`run_job`]. The pieces compose independently: [`TimeMapper`] for clock sync,
//! [`SeriesCursor`] for near-monotone log lookup, [`ChartRenderer`] for the overlay raster,
//! [`composite_onto`] for the blit, and the [`FrameSource`]/[`FrameSink`] traits at the
//! decode and encode seams so the frame loop is testable without any media tooling.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chart;
mod encode;
mod foundation;
mod job;
mod media;
mod overlay;
mod pipeline;
mod series;
mod sync;

pub use chart::renderer::{ChartOptions, ChartRenderer};
pub use encode::ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path, FfmpegSink, FfmpegSinkOpts};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{ChannelOrder, Fps, FrameIndex, Raster};
pub use foundation::error::{OverlogError, OverlogResult};
pub use job::config::{FrameSize, OverlayJob};
pub use media::probe::{probe_stream, VideoStreamMeta};
pub use media::source::{FfmpegFrameSource, FrameSource};
pub use overlay::composite::{composite_onto, Placement};
pub use pipeline::run::{render_chart_at, run_job, run_streams, RunStats};
pub use series::cursor::SeriesCursor;
pub use series::log::TimeSeries;
pub use sync::anchor::SyncAnchor;
pub use sync::mapper::TimeMapper;
