use std::path::Path;

use crate::formats::load_image;
use crate::model::{NormalizedImage, RawImage};

use super::error::Result;

/// Service for reading microscopy images from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    /// Reads an image file as decoded, untouched sample data.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<RawImage> {
        Ok(load_image(path)?)
    }

    /// Reads an image file and maps it onto the canonical RGB working layout.
    pub fn load_normalized(&self, path: impl AsRef<Path>) -> Result<NormalizedImage> {
        let raw = self.load(path)?;
        Ok(NormalizedImage::from_raw(&raw)?)
    }
}
