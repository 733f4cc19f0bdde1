use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::Local;
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageFormat, Luma, RgbImage};

use crate::model::LabelMask;
use crate::render::{Colormap, Figure, mask_panel};

use super::{ExportError, Result};

const DEFAULT_OUTPUT_DIR: &str = "Outputs";
const FIGURE_SCALE: u32 = 2;

/// Writes one run's artifacts into the output directory: the raw mask
/// as .npy, colored mask and outline PNGs, and the composite figure as
/// PNG and SVG. Filenames share a minute-resolution timestamp; name
/// collisions get a numeric suffix instead of overwriting.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    output_dir: PathBuf,
}

/// Absolute paths of everything one run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportBundle {
    pub files: Vec<PathBuf>,
}

impl Default for ExportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ExportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    pub fn write_run(&self, masks: &LabelMask, figure: &Figure) -> Result<ExportBundle> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let stamp = Local::now().format("%Y-%m-%d_%H-%M").to_string();
        let mut files = Vec::with_capacity(5);

        let npy_path = self.unique_path(&format!("masks_cellseg_{stamp}"), "npy");
        ndarray_npy::write_npy(&npy_path, &masks.labels)?;
        files.push(npy_path);

        let mask_png_path = self.unique_path(&format!("masks_cellseg_{stamp}"), "png");
        mask_panel(masks, Colormap::Tab20b).save(&mask_png_path)?;
        files.push(mask_png_path);

        let outline_path = self.unique_path(&format!("outlines_cellseg_{stamp}"), "png");
        outline_image(masks).save(&outline_path)?;
        files.push(outline_path);

        let figure_path = self.unique_path(&format!("result_figure_cellseg_{stamp}"), "png");
        let upscaled = imageops::resize(
            &figure.composite,
            figure.composite.width() * FIGURE_SCALE,
            figure.composite.height() * FIGURE_SCALE,
            FilterType::Nearest,
        );
        upscaled.save(&figure_path)?;
        files.push(figure_path);

        let svg_path = self.unique_path(&format!("result_figure_cellseg_{stamp}"), "svg");
        write_svg(&svg_path, &figure.composite)?;
        files.push(svg_path);

        let files = files
            .into_iter()
            .map(|path| absolute(&path))
            .collect::<Vec<_>>();
        log::info!(
            "exported {} artifacts to {}",
            files.len(),
            self.output_dir.display()
        );
        Ok(ExportBundle { files })
    }

    fn unique_path(&self, base: &str, extension: &str) -> PathBuf {
        let candidate = self.output_dir.join(format!("{base}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        let mut attempt = 2_u32;
        loop {
            let candidate = self
                .output_dir
                .join(format!("{base}_{attempt}.{extension}"));
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }
}

fn outline_image(masks: &LabelMask) -> GrayImage {
    let outlines = masks.outlines();
    let (height, width) = outlines.dims();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        if outlines.is_boundary(y as usize, x as usize) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn write_svg(path: &Path, composite: &RgbImage) -> Result<()> {
    let mut encoded = Vec::new();
    let mut cursor = Cursor::new(&mut encoded);
    composite.write_to(&mut cursor, ImageFormat::Png)?;
    let document = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
            "viewBox=\"0 0 {w} {h}\">\n",
            "  <image width=\"{w}\" height=\"{h}\" href=\"data:image/png;base64,{data}\"/>\n",
            "</svg>\n"
        ),
        w = composite.width(),
        h = composite.height(),
        data = BASE64_STANDARD.encode(encoded),
    );
    fs::write(path, document)?;
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    fs::canonicalize(&joined).unwrap_or(joined)
}
