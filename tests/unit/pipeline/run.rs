use std::path::PathBuf;

use crate::chart::renderer::{ChartOptions, ChartRenderer};
use crate::encode::sink::{InMemorySink, SinkConfig};
use crate::foundation::core::{ChannelOrder, Fps, Raster};
use crate::foundation::error::{OverlogError, OverlogResult};
use crate::media::probe::VideoStreamMeta;
use crate::media::source::FrameSource;
use crate::overlay::composite::{composite_onto, Placement};
use crate::pipeline::run::run_streams;
use crate::series::cursor::SeriesCursor;
use crate::series::log::TimeSeries;
use crate::sync::anchor::SyncAnchor;
use crate::sync::mapper::TimeMapper;

const FRAME_W: u32 = 80;
const FRAME_H: u32 = 60;
const FRAME_FILL: [u8; 3] = [10, 20, 30];

fn meta(name: &str, fps: u32, frame_count: u64) -> VideoStreamMeta {
    VideoStreamMeta {
        path: PathBuf::from(name),
        width: FRAME_W,
        height: FRAME_H,
        fps: Fps::new(fps, 1).unwrap(),
        frame_count,
    }
}

/// Serves solid-color frames; optionally fails or runs dry before the probed count.
struct SyntheticSource {
    meta: VideoStreamMeta,
    served: u64,
    available: u64,
    fail_at: Option<u64>,
}

impl SyntheticSource {
    fn healthy(meta: VideoStreamMeta) -> Self {
        let available = meta.frame_count;
        Self {
            meta,
            served: 0,
            available,
            fail_at: None,
        }
    }

    fn dry_after(meta: VideoStreamMeta, available: u64) -> Self {
        Self {
            meta,
            served: 0,
            available,
            fail_at: None,
        }
    }

    fn failing_at(meta: VideoStreamMeta, fail_at: u64) -> Self {
        let available = meta.frame_count;
        Self {
            meta,
            served: 0,
            available,
            fail_at: Some(fail_at),
        }
    }
}

impl FrameSource for SyntheticSource {
    fn meta(&self) -> &VideoStreamMeta {
        &self.meta
    }

    fn next_frame(&mut self) -> OverlogResult<Option<Raster>> {
        if self.fail_at == Some(self.served) {
            return Err(OverlogError::decode("synthetic decode failure"));
        }
        if self.served >= self.available {
            return Ok(None);
        }
        self.served += 1;
        Ok(Some(Raster::filled(
            self.meta.width,
            self.meta.height,
            ChannelOrder::Bgr,
            FRAME_FILL,
        )))
    }
}

fn series() -> TimeSeries {
    TimeSeries::from_parts(vec![0.0, 10.0, 20.0, 30.0], vec![100, 200, 300, 400]).unwrap()
}

fn chart_opts() -> ChartOptions {
    ChartOptions {
        width: 40,
        height: 20,
        half_window_sec: 30.0,
        y_margin: 5.0,
    }
}

fn sink_cfg() -> SinkConfig {
    SinkConfig {
        width: FRAME_W,
        height: FRAME_H,
        fps_hz: 10.0,
    }
}

fn identity_mapper() -> TimeMapper {
    TimeMapper::new(
        SyncAnchor {
            video_sec: 0.0,
            data_sec: 0.0,
        },
        SyncAnchor {
            video_sec: 10.0,
            data_sec: 10.0,
        },
    )
    .unwrap()
}

/// What the pipeline should have produced for a frame mapped to log time `data_sec`, built
/// independently of the frame loop.
fn expected_frame(renderer: &ChartRenderer<'_>, placement: Placement, data_sec: f64) -> Raster {
    let mut cursor = SeriesCursor::new(renderer.series());
    let chart = renderer.render(data_sec, &mut cursor).unwrap();
    let mut frame = Raster::filled(FRAME_W, FRAME_H, ChannelOrder::Bgr, FRAME_FILL);
    composite_onto(&mut frame, &chart, placement).unwrap();
    frame
}

#[test]
fn two_streams_concatenate_on_one_timeline() {
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = identity_mapper();
    let mut sink = InMemorySink::new();

    let sources = vec![
        Ok(SyntheticSource::healthy(meta("a.avi", 8, 3))),
        Ok(SyntheticSource::healthy(meta("b.avi", 8, 2))),
    ];
    let stats = run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap();

    assert_eq!(stats.streams, 2);
    assert_eq!(stats.frames_written, 5);
    assert_eq!(stats.truncated_streams, 0);
    assert!(sink.ended());
    assert_eq!(sink.frames().len(), 5);
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.width, FRAME_W);
        assert_eq!(frame.height, FRAME_H);
        assert_eq!(frame.order, ChannelOrder::Bgr);
    }

    // Pixels outside the chart region keep the source frame's color.
    let (_, first) = &sink.frames()[0];
    assert_eq!(first.pixel(0, 0), FRAME_FILL);

    // Frame 4 is the second frame of the second stream: 3 frames of stream one have elapsed,
    // so it sits at 0.5s on the global 8fps timeline.
    let (_, fourth) = &sink.frames()[4];
    assert_eq!(*fourth, expected_frame(&renderer, placement, 0.5));
}

#[test]
fn decode_failure_truncates_and_the_run_continues() {
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = identity_mapper();
    let mut sink = InMemorySink::new();

    let sources = vec![
        Ok(SyntheticSource::failing_at(meta("bad.avi", 8, 100), 50)),
        Ok(SyntheticSource::healthy(meta("good.avi", 8, 10))),
    ];
    let stats = run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap();

    assert_eq!(stats.streams, 2);
    assert_eq!(stats.frames_written, 60);
    assert_eq!(stats.truncated_streams, 1);
    assert!(sink.ended());

    // The clock still advanced by the first stream's probed 12.5s, not its decoded 6.25s, so
    // the second stream's first frame sits at 12.5s.
    let (idx, frame) = &sink.frames()[50];
    assert_eq!(idx.0, 50);
    assert_eq!(*frame, expected_frame(&renderer, placement, 12.5));
}

#[test]
fn early_end_of_stream_counts_as_truncation() {
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = identity_mapper();
    let mut sink = InMemorySink::new();

    let sources = vec![Ok(SyntheticSource::dry_after(meta("short.avi", 8, 8), 5))];
    let stats = run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap();

    assert_eq!(stats.frames_written, 5);
    assert_eq!(stats.truncated_streams, 1);
    assert!(sink.ended());
}

#[test]
fn empty_source_list_still_finalizes_the_sink() {
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = identity_mapper();
    let mut sink = InMemorySink::new();

    let sources: Vec<OverlogResult<SyntheticSource>> = Vec::new();
    let stats = run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap();

    assert_eq!(stats, crate::pipeline::run::RunStats::default());
    assert!(sink.ended());
    assert!(sink.frames().is_empty());
}

#[test]
fn open_failure_is_fatal() {
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = identity_mapper();
    let mut sink = InMemorySink::new();

    let sources: Vec<OverlogResult<SyntheticSource>> =
        vec![Err(OverlogError::load("missing.avi"))];
    let err =
        run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap_err();
    assert!(matches!(err, OverlogError::Load(_)));
}

#[test]
fn scaled_mapper_places_the_marker_on_the_log_clock() {
    // 2x clock: frame 5 of an 8fps stream sits at 0.625s of video, 1.25s of log time.
    let s = series();
    let renderer = ChartRenderer::new(&s, chart_opts()).unwrap();
    let placement = Placement::bottom_center(FRAME_W, FRAME_H, 40, 20).unwrap();
    let mapper = TimeMapper::new(
        SyncAnchor {
            video_sec: 0.0,
            data_sec: 0.0,
        },
        SyncAnchor {
            video_sec: 10.0,
            data_sec: 20.0,
        },
    )
    .unwrap();
    let mut sink = InMemorySink::new();

    let sources = vec![Ok(SyntheticSource::healthy(meta("a.avi", 8, 6)))];
    run_streams(sources, &mut sink, &mapper, &renderer, placement, sink_cfg()).unwrap();

    let (_, fifth) = &sink.frames()[5];
    assert_eq!(*fifth, expected_frame(&renderer, placement, 1.25));
}
