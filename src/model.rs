mod error;
mod image;
mod mask;

#[cfg(test)]
mod tests;

pub use error::{DataError, Result};
pub use image::{NormalizedImage, RawImage, SampleKind};
pub use mask::{LabelMask, OutlineMap};
