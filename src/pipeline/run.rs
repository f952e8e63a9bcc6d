use tracing::{info, warn};

use crate::chart::renderer::ChartRenderer;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::{OverlogError, OverlogResult};
use crate::job::config::OverlayJob;
use crate::media::probe::probe_stream;
use crate::media::source::{FfmpegFrameSource, FrameSource};
use crate::overlay::composite::{composite_onto, Placement};
use crate::series::cursor::SeriesCursor;
use crate::series::log::TimeSeries;
use crate::sync::mapper::TimeMapper;

/// Counters reported by a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Streams opened.
    pub streams: usize,
    /// Frames pushed to the sink.
    pub frames_written: u64,
    /// Streams that ended before their probed frame count.
    pub truncated_streams: usize,
}

/// Drive the frame loop over a sequence of sources into `sink`.
///
/// Sources are opened lazily, one at a time; a failure to open is fatal, while a decode
/// failure mid-stream truncates that stream and moves on. The per-stream clock always
/// advances by the probed duration, even after truncation, so later streams keep their
/// absolute position on the video timeline. The sink is begun before the first frame and
/// finalized exactly once, even when every stream truncates.
pub fn run_streams<S, I, K>(
    sources: I,
    sink: &mut K,
    mapper: &TimeMapper,
    renderer: &ChartRenderer<'_>,
    placement: Placement,
    sink_cfg: SinkConfig,
) -> OverlogResult<RunStats>
where
    S: FrameSource,
    I: IntoIterator<Item = OverlogResult<S>>,
    K: FrameSink + ?Sized,
{
    sink.begin(sink_cfg)?;
    let mut cursor = SeriesCursor::new(renderer.series());
    let mut stats = RunStats::default();
    let mut elapsed_secs = 0.0f64;
    let mut next_idx = 0u64;

    for source in sources {
        let mut source = source?;
        let frame_count = source.meta().frame_count;
        let frame_secs = source.meta().fps.frame_duration_secs();
        let path = source.meta().path.clone();
        stats.streams += 1;
        info!(
            path = %path.display(),
            frames = frame_count,
            fps = source.meta().fps.as_f64(),
            "processing stream"
        );

        for f in 0..frame_count {
            let mut frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    warn!(
                        path = %path.display(),
                        decoded = f,
                        expected = frame_count,
                        "stream ended early, truncating"
                    );
                    stats.truncated_streams += 1;
                    break;
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        decoded = f,
                        expected = frame_count,
                        error = %e,
                        "decode failed, truncating stream"
                    );
                    stats.truncated_streams += 1;
                    break;
                }
            };

            let video_sec = elapsed_secs + f as f64 * frame_secs;
            let data_sec = mapper.map(video_sec);
            let chart = renderer.render(data_sec, &mut cursor)?;
            composite_onto(&mut frame, &chart, placement)?;
            sink.push_frame(FrameIndex(next_idx), &frame)?;
            next_idx += 1;
            stats.frames_written += 1;
        }

        // The clock advances by the probed duration regardless of truncation, so sync for
        // the remaining streams is unaffected by one bad tail.
        elapsed_secs += frame_count as f64 * frame_secs;
    }

    sink.end()?;
    Ok(stats)
}

/// Execute a full overlay job: probe every input, build the sync mapping, and stream
/// composited frames into an MP4.
#[tracing::instrument(skip_all, fields(out = %job.out.display()))]
pub fn run_job(job: &OverlayJob) -> OverlogResult<RunStats> {
    job.validate()?;

    let metas = probe_all(job)?;
    let avg_fps = metas.iter().map(|m| m.fps.as_f64()).sum::<f64>() / metas.len() as f64;
    let total_frames: u64 = metas.iter().map(|m| m.frame_count).sum();
    let total_secs = total_frames as f64 / avg_fps;
    info!(
        streams = metas.len(),
        total_frames,
        total_secs,
        "probed inputs"
    );

    let series = TimeSeries::load(&job.log)?;
    info!(
        path = %job.log.display(),
        points = series.len(),
        span_secs = series.end_time() - series.start_time(),
        "loaded log"
    );

    let mapper = build_mapper(job, total_secs)?;
    let placement = job.resolved_placement()?;
    let renderer = ChartRenderer::new(&series, job.chart)?;

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&job.out));
    let sink_cfg = SinkConfig {
        width: job.frame.width,
        height: job.frame.height,
        fps_hz: avg_fps,
    };
    let sources = metas.into_iter().map(FfmpegFrameSource::open);
    let stats = run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg)?;

    info!(
        out = %job.out.display(),
        frames = stats.frames_written,
        truncated = stats.truncated_streams,
        "run complete"
    );
    Ok(stats)
}

/// Render the chart raster this job would composite at video time `video_sec`, without
/// decoding or encoding any video. Inputs are probed only when a from-the-end anchor makes
/// the total duration necessary.
pub fn render_chart_at(job: &OverlayJob, video_sec: f64) -> OverlogResult<Raster> {
    job.validate()?;

    let needs_total = job.sync.iter().any(|a| a.video_sec < 0.0);
    let total_secs = if needs_total {
        let metas = probe_all(job)?;
        let avg_fps = metas.iter().map(|m| m.fps.as_f64()).sum::<f64>() / metas.len() as f64;
        metas.iter().map(|m| m.frame_count).sum::<u64>() as f64 / avg_fps
    } else {
        0.0
    };

    let series = TimeSeries::load(&job.log)?;
    let mapper = build_mapper(job, total_secs)?;
    let renderer = ChartRenderer::new(&series, job.chart)?;
    let mut cursor = SeriesCursor::new(&series);
    renderer.render(mapper.map(video_sec), &mut cursor)
}

fn probe_all(job: &OverlayJob) -> OverlogResult<Vec<crate::media::probe::VideoStreamMeta>> {
    let mut metas = Vec::with_capacity(job.videos.len());
    for path in &job.videos {
        let meta = probe_stream(path)?;
        if meta.width != job.frame.width || meta.height != job.frame.height {
            return Err(OverlogError::config(format!(
                "'{}' is {}x{}, but the job expects {}x{} frames",
                path.display(),
                meta.width,
                meta.height,
                job.frame.width,
                job.frame.height
            )));
        }
        metas.push(meta);
    }
    Ok(metas)
}

fn build_mapper(job: &OverlayJob, total_secs: f64) -> OverlogResult<TimeMapper> {
    let a1 = job.sync[0].resolve_from_end(total_secs);
    let a2 = job.sync[1].resolve_from_end(total_secs);
    TimeMapper::new(a1, a2)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
