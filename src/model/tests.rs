use ndarray::{Array, Array2, array};

use super::{DataError, LabelMask, NormalizedImage, RawImage, SampleKind};

fn gray_u8(height: usize, width: usize, values: Vec<u8>) -> RawImage {
    RawImage::U8(
        Array::from_shape_vec((height, width), values)
            .expect("shape")
            .into_dyn(),
    )
}

#[test]
fn normalize_replicates_grayscale_across_rgb() {
    let raw = gray_u8(2, 2, vec![0, 10, 20, 255]);
    let image = NormalizedImage::from_raw(&raw).expect("normalize");
    assert_eq!(image.dims(), (2, 2));
    assert_eq!(image.data()[[0, 1, 0]], 10);
    assert_eq!(image.data()[[0, 1, 1]], 10);
    assert_eq!(image.data()[[0, 1, 2]], 10);
    assert_eq!(image.data()[[1, 1, 2]], 255);
}

#[test]
fn normalize_drops_alpha_channel() {
    let values = vec![
        1u8, 2, 3, 200, // pixel (0,0)
        4, 5, 6, 100, // pixel (0,1)
    ];
    let raw = RawImage::U8(
        Array::from_shape_vec((1, 2, 4), values)
            .expect("shape")
            .into_dyn(),
    );
    let image = NormalizedImage::from_raw(&raw).expect("normalize");
    assert_eq!(image.dims(), (1, 2));
    assert_eq!(image.data()[[0, 0, 0]], 1);
    assert_eq!(image.data()[[0, 0, 2]], 3);
    assert_eq!(image.data()[[0, 1, 1]], 5);
}

#[test]
fn normalize_scales_floats_with_truncating_cast() {
    let raw = RawImage::F32(
        Array::from_shape_vec((1, 4), vec![0.0_f32, 0.5, 1.0, 2.0])
            .expect("shape")
            .into_dyn(),
    );
    let image = NormalizedImage::from_raw(&raw).expect("normalize");
    assert_eq!(image.data()[[0, 0, 0]], 0);
    assert_eq!(image.data()[[0, 1, 0]], 127);
    assert_eq!(image.data()[[0, 2, 0]], 255);
    // out-of-range floats saturate instead of wrapping
    assert_eq!(image.data()[[0, 3, 0]], 255);
}

#[test]
fn normalize_keeps_u8_values_unchanged() {
    let values = vec![9u8, 18, 27, 36, 45, 54];
    let raw = RawImage::U8(
        Array::from_shape_vec((1, 2, 3), values.clone())
            .expect("shape")
            .into_dyn(),
    );
    let image = NormalizedImage::from_raw(&raw).expect("normalize");
    assert_eq!(image.to_rgb_bytes(), values);
}

#[test]
fn normalize_rejects_unsupported_shapes() {
    let two_channel = RawImage::U8(
        Array::from_shape_vec((2, 2, 2), vec![0u8; 8])
            .expect("shape")
            .into_dyn(),
    );
    assert!(matches!(
        NormalizedImage::from_raw(&two_channel),
        Err(DataError::UnsupportedShape { .. })
    ));

    let stack = RawImage::U8(
        Array::from_shape_vec((2, 2, 2, 3), vec![0u8; 24])
            .expect("shape")
            .into_dyn(),
    );
    assert!(NormalizedImage::from_raw(&stack).is_err());
}

#[test]
fn normalize_rejects_zero_sized_axes() {
    let raw = RawImage::U8(
        Array::from_shape_vec((0, 4), Vec::new())
            .expect("shape")
            .into_dyn(),
    );
    assert!(matches!(
        NormalizedImage::from_raw(&raw),
        Err(DataError::ZeroSizedDimension { axis: 0 })
    ));
}

#[test]
fn sample_kind_tracks_variant() {
    let raw = gray_u8(1, 1, vec![7]);
    assert_eq!(raw.sample_kind(), SampleKind::U8);
    assert_eq!(raw.sample_kind().name(), "u8");
}

#[test]
fn mean_channel_averages_planes() {
    let raw = RawImage::U8(
        Array::from_shape_vec((1, 1, 3), vec![10u8, 20, 30])
            .expect("shape")
            .into_dyn(),
    );
    let image = NormalizedImage::from_raw(&raw).expect("normalize");
    let mean = image.mean_channel();
    assert!((mean[[0, 0]] - 20.0).abs() < 1e-4);
}

#[test]
fn cell_count_ignores_background_and_label_gaps() {
    let mask = LabelMask::new(array![[0, 1, 2], [2, 3, 0]]);
    assert_eq!(mask.cell_count(), 3);
    assert_eq!(mask.max_label(), 3);

    let empty = LabelMask::new(Array2::zeros((3, 3)));
    assert_eq!(empty.cell_count(), 0);
    assert_eq!(empty.max_label(), 0);
}

#[test]
fn cell_count_handles_masks_without_background() {
    let mask = LabelMask::new(array![[1, 1, 2]]);
    assert_eq!(mask.cell_count(), 2);
}

#[test]
fn outlines_mark_border_and_label_transitions() {
    // 5x5 mask with a solid 3x3 block of label 1 in the middle
    let mut labels = Array2::zeros((5, 5));
    for y in 1..4 {
        for x in 1..4 {
            labels[[y, x]] = 1;
        }
    }
    let outlines = LabelMask::new(labels).outlines();
    assert!(outlines.is_boundary(1, 1));
    assert!(outlines.is_boundary(1, 2));
    assert!(!outlines.is_boundary(2, 2)); // interior pixel
    assert!(!outlines.is_boundary(0, 0)); // background stays background
}

#[test]
fn outlines_treat_image_border_as_background() {
    let mask = LabelMask::new(array![[5]]);
    assert!(mask.outlines().is_boundary(0, 0));
}

#[test]
fn outline_map_exposes_the_full_boundary_array() {
    let mask = LabelMask::new(Array2::from_elem((3, 3), 1));
    let outlines = mask.outlines();
    let mut expected = Array2::from_elem((3, 3), true);
    expected[[1, 1]] = false;
    assert_eq!(outlines.as_array(), &expected);
}

#[test]
fn outlines_separate_touching_labels() {
    let mask = LabelMask::new(array![[1, 1, 2, 2]]);
    let outlines = mask.outlines();
    assert!(outlines.is_boundary(0, 1));
    assert!(outlines.is_boundary(0, 2));
}
