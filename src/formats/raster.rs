use std::path::Path;

use image::DynamicImage;
use ndarray::Array;

use crate::model::RawImage;

use super::Result;

pub(crate) fn read_common_raster(path: &Path) -> Result<RawImage> {
    let image = image::open(path)?;
    let raw = match image {
        DynamicImage::ImageLuma8(buffer) => {
            let (width, height) = buffer.dimensions();
            let data = Array::from_shape_vec(
                (height as usize, width as usize),
                buffer.into_raw(),
            )
            .expect("shape checked")
            .into_dyn();
            RawImage::U8(data)
        }
        DynamicImage::ImageRgb8(buffer) => {
            let (width, height) = buffer.dimensions();
            let data = Array::from_shape_vec(
                (height as usize, width as usize, 3usize),
                buffer.into_raw(),
            )
            .expect("shape checked")
            .into_dyn();
            RawImage::U8(data)
        }
        DynamicImage::ImageRgba8(buffer) => {
            let (width, height) = buffer.dimensions();
            let data = Array::from_shape_vec(
                (height as usize, width as usize, 4usize),
                buffer.into_raw(),
            )
            .expect("shape checked")
            .into_dyn();
            RawImage::U8(data)
        }
        DynamicImage::ImageLuma16(buffer) => {
            let (width, height) = buffer.dimensions();
            let values = buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 65_535.0)
                .collect::<Vec<_>>();
            let data = Array::from_shape_vec((height as usize, width as usize), values)
                .expect("shape checked")
                .into_dyn();
            RawImage::F32(data)
        }
        DynamicImage::ImageRgb16(buffer) => {
            let (width, height) = buffer.dimensions();
            let mut values = Vec::with_capacity(height as usize * width as usize * 3);
            for pixel in buffer.pixels() {
                values.push(f32::from(pixel.0[0]) / 65_535.0);
                values.push(f32::from(pixel.0[1]) / 65_535.0);
                values.push(f32::from(pixel.0[2]) / 65_535.0);
            }
            let data = Array::from_shape_vec((height as usize, width as usize, 3usize), values)
                .expect("shape checked")
                .into_dyn();
            RawImage::F32(data)
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            let data = Array::from_shape_vec(
                (height as usize, width as usize, 3usize),
                rgb.into_raw(),
            )
            .expect("shape checked")
            .into_dyn();
            RawImage::U8(data)
        }
    };
    Ok(raw)
}
