use std::fs::File;
use std::path::Path;

use image::{ImageBuffer, Luma, Rgb, Rgba};
use tempfile::tempdir;
use tiff::encoder::{TiffEncoder, colortype};

use super::{LoadError, load_image, supported_extensions};
use crate::model::{RawImage, SampleKind};

#[test]
fn missing_file_is_reported_before_decoding() {
    let err = load_image(Path::new("no-such-image.png")).expect_err("must fail");
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.to_string().contains("no-such-image.png"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("frame.bmp");
    std::fs::write(&path, b"not an image").expect("write");
    let err = load_image(&path).expect_err("must fail");
    assert!(matches!(err, LoadError::UnsupportedFormat(_)));
}

#[test]
fn corrupt_png_surfaces_decode_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").expect("write");
    assert!(matches!(
        load_image(&path),
        Err(LoadError::Decode(_))
    ));
}

#[test]
fn gray_png_decodes_to_2d_u8() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gray.png");
    let image =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(2, 2, vec![0, 50, 100, 255]).expect("image");
    image.save(&path).expect("save png");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.sample_kind(), SampleKind::U8);
    assert_eq!(raw.shape(), &[2, 2]);
    let RawImage::U8(data) = raw else {
        panic!("expected u8 samples");
    };
    assert_eq!(data[[0, 1]], 50);
    assert_eq!(data[[1, 1]], 255);
}

#[test]
fn rgb_png_decodes_with_channel_axis_last() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("color.png");
    let mut image = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([0, 255, 0]));
    image.save(&path).expect("save png");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.shape(), &[1, 2, 3]);
    let RawImage::U8(data) = raw else {
        panic!("expected u8 samples");
    };
    assert_eq!(data[[0, 0, 0]], 255);
    assert_eq!(data[[0, 1, 1]], 255);
}

#[test]
fn rgba_png_keeps_alpha_for_later_stripping() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("alpha.png");
    let mut image = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(1, 1);
    image.put_pixel(0, 0, Rgba([10, 20, 30, 128]));
    image.save(&path).expect("save png");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.shape(), &[1, 1, 4]);
}

#[test]
fn sixteen_bit_png_decodes_to_unit_floats() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("deep.png");
    let image =
        ImageBuffer::<Luma<u16>, Vec<u16>>::from_vec(2, 1, vec![0, 65_535]).expect("image");
    image.save(&path).expect("save png");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.sample_kind(), SampleKind::F32);
    let RawImage::F32(data) = raw else {
        panic!("expected f32 samples");
    };
    assert!((data[[0, 0]] - 0.0).abs() < 1e-6);
    assert!((data[[0, 1]] - 1.0).abs() < 1e-6);
}

#[test]
fn gray_tiff_decodes_to_2d_u8() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plane.tiff");
    let mut encoder = TiffEncoder::new(File::create(&path).expect("create")).expect("encoder");
    encoder
        .write_image::<colortype::Gray8>(3, 2, &[0, 1, 2, 3, 4, 5])
        .expect("write tiff");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.sample_kind(), SampleKind::U8);
    assert_eq!(raw.shape(), &[2, 3]);
    let RawImage::U8(data) = raw else {
        panic!("expected u8 samples");
    };
    assert_eq!(data[[1, 2]], 5);
}

#[test]
fn rgb_tiff_decodes_with_channel_axis_last() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("color.tif");
    let mut encoder = TiffEncoder::new(File::create(&path).expect("create")).expect("encoder");
    encoder
        .write_image::<colortype::RGB8>(1, 1, &[9, 8, 7])
        .expect("write tiff");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.shape(), &[1, 1, 3]);
    let RawImage::U8(data) = raw else {
        panic!("expected u8 samples");
    };
    assert_eq!(data[[0, 0, 0]], 9);
    assert_eq!(data[[0, 0, 2]], 7);
}

#[test]
fn sixteen_bit_tiff_decodes_to_unit_floats() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("deep.tif");
    let mut encoder = TiffEncoder::new(File::create(&path).expect("create")).expect("encoder");
    encoder
        .write_image::<colortype::Gray16>(2, 1, &[0u16, 65_535])
        .expect("write tiff");

    let raw = load_image(&path).expect("load");
    assert_eq!(raw.sample_kind(), SampleKind::F32);
    let RawImage::F32(data) = raw else {
        panic!("expected f32 samples");
    };
    assert!((data[[0, 1]] - 1.0).abs() < 1e-6);
}

#[test]
fn extension_list_covers_the_ui_filter() {
    let extensions = supported_extensions();
    for ext in ["tif", "tiff", "png", "jpg", "jpeg"] {
        assert!(extensions.contains(&ext));
    }
}
