use ndarray::{Array2, Array3};
use tempfile::tempdir;

use crate::model::{LabelMask, NormalizedImage};
use crate::render::{Colormap, DisplayMode, Figure, render_figure};

use super::ExportWriter;

fn sample_run() -> (LabelMask, Figure) {
    let mut labels = Array2::zeros((6, 6));
    for y in 1..4 {
        for x in 1..4 {
            labels[[y, x]] = 1;
        }
    }
    let masks = LabelMask::new(labels);
    let data = Array3::from_elem((6, 6, 3), 90_u8);
    let image = NormalizedImage::new(data).expect("image");
    let figure =
        render_figure(&image, &masks, DisplayMode::Rgb, Colormap::Tab20b).expect("render");
    (masks, figure)
}

#[test]
fn write_run_produces_five_artifacts() {
    let dir = tempdir().expect("tempdir");
    let writer = ExportWriter::with_output_dir(dir.path().join("Outputs"));
    let (masks, figure) = sample_run();

    let bundle = writer.write_run(&masks, &figure).expect("export");
    assert_eq!(bundle.files.len(), 5);
    for file in &bundle.files {
        assert!(file.is_absolute());
        assert!(file.exists());
    }

    let extensions = bundle
        .files
        .iter()
        .filter_map(|file| file.extension().and_then(|ext| ext.to_str()))
        .collect::<Vec<_>>();
    assert!(extensions.contains(&"npy"));
    assert!(extensions.contains(&"svg"));
    assert_eq!(extensions.iter().filter(|ext| **ext == "png").count(), 3);
}

#[test]
fn colliding_names_get_numeric_suffixes() {
    let dir = tempdir().expect("tempdir");
    let writer = ExportWriter::with_output_dir(dir.path());
    let (masks, figure) = sample_run();

    let first = writer.write_run(&masks, &figure).expect("first export");
    let second = writer.write_run(&masks, &figure).expect("second export");
    for file in &second.files {
        assert!(!first.files.contains(file));
        assert!(file.exists());
    }
}

#[test]
fn npy_mask_round_trips() {
    let dir = tempdir().expect("tempdir");
    let writer = ExportWriter::with_output_dir(dir.path());
    let (masks, figure) = sample_run();

    let bundle = writer.write_run(&masks, &figure).expect("export");
    let npy = bundle
        .files
        .iter()
        .find(|file| file.extension().and_then(|ext| ext.to_str()) == Some("npy"))
        .expect("npy artifact");
    let restored: Array2<u32> = ndarray_npy::read_npy(npy).expect("read npy");
    assert_eq!(restored, masks.labels);
}

#[test]
fn svg_embeds_the_figure_as_png() {
    let dir = tempdir().expect("tempdir");
    let writer = ExportWriter::with_output_dir(dir.path());
    let (masks, figure) = sample_run();

    let bundle = writer.write_run(&masks, &figure).expect("export");
    let svg = bundle
        .files
        .iter()
        .find(|file| file.extension().and_then(|ext| ext.to_str()) == Some("svg"))
        .expect("svg artifact");
    let document = std::fs::read_to_string(svg).expect("read svg");
    assert!(document.starts_with("<svg"));
    assert!(document.contains("data:image/png;base64,"));
}

#[test]
fn figure_png_is_upscaled() {
    let dir = tempdir().expect("tempdir");
    let writer = ExportWriter::with_output_dir(dir.path());
    let (masks, figure) = sample_run();

    let bundle = writer.write_run(&masks, &figure).expect("export");
    let figure_png = bundle
        .files
        .iter()
        .find(|file| {
            file.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("result_figure") && name.ends_with(".png"))
        })
        .expect("figure artifact");
    let decoded = image::open(figure_png).expect("decode figure");
    assert_eq!(decoded.width(), figure.composite.width() * 2);
    assert_eq!(decoded.height(), figure.composite.height() * 2);
}
