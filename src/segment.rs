mod backend;
mod error;
mod intensity;
mod params;


pub use backend::SegmentationBackend;
pub use error::{Result, SegmentError};
pub use intensity::IntensityBackend;
pub use params::{ModelKind, SegmentParams};
