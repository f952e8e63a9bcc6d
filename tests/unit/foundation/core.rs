use crate::foundation::core::{ChannelOrder, Fps, Raster};
use crate::foundation::error::OverlogError;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_conversions() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 0.01);
    assert!((fps.as_f64() * fps.frame_duration_secs() - 1.0).abs() < 1e-12);

    let fps = Fps::new(25, 1).unwrap();
    assert_eq!(fps.as_f64(), 25.0);
    assert_eq!(fps.frame_duration_secs(), 0.04);
}

#[test]
fn raster_new_validates_buffer_length() {
    let ok = Raster::new(4, 3, ChannelOrder::Rgb, vec![0u8; 4 * 3 * 3]);
    assert!(ok.is_ok());

    let err = Raster::new(4, 3, ChannelOrder::Rgb, vec![0u8; 10]).unwrap_err();
    assert!(matches!(err, OverlogError::Config(_)));
}

#[test]
fn filled_raster_reads_back_its_color() {
    let r = Raster::filled(3, 2, ChannelOrder::Bgr, [1, 2, 3]);
    assert_eq!(r.data.len(), Raster::byte_len(3, 2));
    assert_eq!(r.pixel(0, 0), [1, 2, 3]);
    assert_eq!(r.pixel(2, 1), [1, 2, 3]);
}

#[test]
#[should_panic(expected = "pixel out of bounds")]
fn pixel_out_of_bounds_panics() {
    let r = Raster::filled(3, 2, ChannelOrder::Rgb, [0, 0, 0]);
    r.pixel(3, 0);
}
