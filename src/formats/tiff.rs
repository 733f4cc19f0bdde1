use std::fs::File;
use std::path::Path;

use ndarray::{Array, ArrayD};
use tiff::decoder::{Decoder, DecodingResult};

use crate::model::RawImage;

use super::{LoadError, Result};

pub(crate) fn read_tiff(path: &Path) -> Result<RawImage> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let pixel_count = width as usize * height as usize;

    let raw = match decoder.read_image()? {
        DecodingResult::U8(buffer) => {
            let channels = channel_count(buffer.len(), pixel_count)?;
            RawImage::U8(shape_samples(
                buffer,
                height as usize,
                width as usize,
                channels,
            ))
        }
        DecodingResult::U16(buffer) => {
            let channels = channel_count(buffer.len(), pixel_count)?;
            let values = buffer
                .into_iter()
                .map(|value| f32::from(value) / 65_535.0)
                .collect::<Vec<_>>();
            RawImage::F32(shape_samples(
                values,
                height as usize,
                width as usize,
                channels,
            ))
        }
        DecodingResult::F32(buffer) => {
            let channels = channel_count(buffer.len(), pixel_count)?;
            let values = buffer
                .into_iter()
                .map(|value| value.clamp(0.0, 1.0))
                .collect::<Vec<_>>();
            RawImage::F32(shape_samples(
                values,
                height as usize,
                width as usize,
                channels,
            ))
        }
        other => {
            return Err(LoadError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {other:?}"
            )));
        }
    };

    if decoder.more_images() {
        log::warn!(
            "{} has multiple TIFF pages, only the first is used",
            path.display()
        );
    }

    Ok(raw)
}

fn channel_count(sample_count: usize, pixel_count: usize) -> Result<usize> {
    if pixel_count == 0 || sample_count % pixel_count != 0 {
        return Err(LoadError::UnsupportedLayout(format!(
            "TIFF sample count {sample_count} does not match the page dimensions"
        )));
    }
    let channels = sample_count / pixel_count;
    if channels == 1 || channels == 3 || channels == 4 {
        Ok(channels)
    } else {
        Err(LoadError::UnsupportedLayout(format!(
            "unsupported TIFF channel count: {channels}"
        )))
    }
}

fn shape_samples<T>(values: Vec<T>, height: usize, width: usize, channels: usize) -> ArrayD<T> {
    if channels == 1 {
        Array::from_shape_vec((height, width), values)
            .expect("length checked against the page dimensions")
            .into_dyn()
    } else {
        Array::from_shape_vec((height, width, channels), values)
            .expect("length checked against the page dimensions")
            .into_dyn()
    }
}
