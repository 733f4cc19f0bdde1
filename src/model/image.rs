use ndarray::{Array2, Array3, ArrayD, Axis};

use super::{DataError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    U8,
    F32,
}

impl SampleKind {
    pub fn name(&self) -> &'static str {
        match self {
            SampleKind::U8 => "u8",
            SampleKind::F32 => "f32",
        }
    }
}

/// Pixel data as it came off disk, before normalization. Float samples
/// are kept in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub enum RawImage {
    U8(ArrayD<u8>),
    F32(ArrayD<f32>),
}

impl RawImage {
    pub fn shape(&self) -> &[usize] {
        match self {
            RawImage::U8(data) => data.shape(),
            RawImage::F32(data) => data.shape(),
        }
    }

    pub fn sample_kind(&self) -> SampleKind {
        match self {
            RawImage::U8(_) => SampleKind::U8,
            RawImage::F32(_) => SampleKind::F32,
        }
    }
}

/// Image in the canonical working layout: height x width x RGB, 8 bits
/// per sample. Everything downstream of loading consumes this.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    data: Array3<u8>,
}

impl NormalizedImage {
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let shape = data.shape().to_vec();
        if shape[2] != 3 {
            return Err(DataError::UnsupportedShape { shape });
        }
        for (axis, size) in shape.iter().enumerate() {
            if *size == 0 {
                return Err(DataError::ZeroSizedDimension { axis });
            }
        }
        Ok(Self { data })
    }

    /// Maps decoded pixels onto the working layout: grayscale planes are
    /// replicated across RGB, alpha channels are dropped, and float
    /// samples are scaled by 255 with a truncating cast.
    pub fn from_raw(raw: &RawImage) -> Result<Self> {
        let (height, width, channels) = plane_layout(raw.shape())?;
        let mut values = Vec::with_capacity(height * width * 3);
        for y in 0..height {
            for x in 0..width {
                for channel in 0..3 {
                    let value = match (raw, channels) {
                        (RawImage::U8(data), 1) => data[[y, x]],
                        (RawImage::U8(data), _) => data[[y, x, channel]],
                        (RawImage::F32(data), 1) => scale_float(data[[y, x]]),
                        (RawImage::F32(data), _) => scale_float(data[[y, x, channel]]),
                    };
                    values.push(value);
                }
            }
        }
        let data = Array3::from_shape_vec((height, width, 3), values)
            .expect("vector length matches the computed shape");
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// One color plane (0 = red, 1 = green, 2 = blue).
    pub fn channel(&self, index: usize) -> Array2<u8> {
        self.data.index_axis(Axis(2), index).to_owned()
    }

    /// Per-pixel mean of the three color planes, in [0, 255].
    pub fn mean_channel(&self) -> Array2<f32> {
        self.data
            .mapv(|value| value as f32)
            .mean_axis(Axis(2))
            .expect("channel axis is non-empty")
    }

    /// Flat RGB bytes in row-major order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}

fn scale_float(value: f32) -> u8 {
    (value * 255.0) as u8
}

fn plane_layout(shape: &[usize]) -> Result<(usize, usize, usize)> {
    for (axis, size) in shape.iter().enumerate() {
        if *size == 0 {
            return Err(DataError::ZeroSizedDimension { axis });
        }
    }
    match shape {
        [height, width] => Ok((*height, *width, 1)),
        [height, width, channels] if *channels == 3 || *channels == 4 => {
            Ok((*height, *width, *channels))
        }
        _ => Err(DataError::UnsupportedShape {
            shape: shape.to_vec(),
        }),
    }
}
