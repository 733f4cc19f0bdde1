mod api;
mod error;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{load_image, supported_extensions};
pub use error::{LoadError, Result};
