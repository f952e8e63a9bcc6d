use crate::chart::renderer::{ChartOptions, ChartRenderer};
use crate::foundation::core::ChannelOrder;
use crate::series::cursor::SeriesCursor;
use crate::series::log::TimeSeries;

fn opts(width: u32, height: u32) -> ChartOptions {
    ChartOptions {
        width,
        height,
        half_window_sec: 30.0,
        y_margin: 5.0,
    }
}

fn series() -> TimeSeries {
    TimeSeries::from_parts(vec![0.0, 10.0, 20.0, 30.0], vec![100, 250, 150, 300]).unwrap()
}

#[test]
fn renders_an_rgb_raster_of_the_requested_size() {
    let s = series();
    let r = ChartRenderer::new(&s, opts(120, 60)).unwrap();
    let mut cur = SeriesCursor::new(&s);
    let raster = r.render(10.0, &mut cur).unwrap();
    assert_eq!(raster.width, 120);
    assert_eq!(raster.height, 60);
    assert_eq!(raster.order, ChannelOrder::Rgb);
    assert_eq!(raster.data.len(), 120 * 60 * 3);
}

#[test]
fn same_query_time_renders_identical_pixels() {
    let s = series();
    let r = ChartRenderer::new(&s, opts(120, 60)).unwrap();
    let mut cur_a = SeriesCursor::new(&s);
    let mut cur_b = SeriesCursor::new(&s);
    let a = r.render(12.5, &mut cur_a).unwrap();
    let b = r.render(12.5, &mut cur_b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn output_is_not_blank() {
    let s = series();
    let r = ChartRenderer::new(&s, opts(120, 60)).unwrap();
    let mut cur = SeriesCursor::new(&s);
    let raster = r.render(10.0, &mut cur).unwrap();
    assert!(raster.data.iter().any(|&b| b != 255));
    // Margin corners stay background white.
    assert_eq!(raster.pixel(0, 0), [255, 255, 255]);
}

#[test]
fn window_scrolls_with_the_query_time() {
    let s = series();
    let r = ChartRenderer::new(&s, opts(120, 60)).unwrap();
    let mut cur = SeriesCursor::new(&s);
    let early = r.render(0.0, &mut cur).unwrap();
    let late = r.render(25.0, &mut cur).unwrap();
    assert_ne!(early, late);
}

#[test]
fn flat_series_still_gets_a_nonempty_y_axis() {
    let s = TimeSeries::from_parts(vec![0.0, 10.0], vec![42, 42]).unwrap();
    let mut o = opts(80, 40);
    o.y_margin = 0.0;
    let r = ChartRenderer::new(&s, o).unwrap();
    let mut cur = SeriesCursor::new(&s);
    assert!(r.render(5.0, &mut cur).is_ok());
}

#[test]
fn rejects_bad_geometry() {
    let s = series();
    assert!(ChartRenderer::new(&s, opts(0, 60)).is_err());
    assert!(ChartRenderer::new(&s, opts(120, 0)).is_err());
    let mut o = opts(120, 60);
    o.half_window_sec = 0.0;
    assert!(ChartRenderer::new(&s, o).is_err());
    let mut o = opts(120, 60);
    o.y_margin = -1.0;
    assert!(ChartRenderer::new(&s, o).is_err());
}
