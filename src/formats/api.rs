use std::path::Path;

use crate::model::RawImage;

use super::raster::read_common_raster;
use super::tiff::read_tiff;
use super::util::extension;
use super::{LoadError, Result};

/// Reads a microscopy image from disk, dispatching on the file extension.
pub fn load_image(path: impl AsRef<Path>) -> Result<RawImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_common_raster(path),
        "tif" | "tiff" => read_tiff(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

pub fn supported_extensions() -> &'static [&'static str] {
    &["tif", "tiff", "png", "jpg", "jpeg"]
}
