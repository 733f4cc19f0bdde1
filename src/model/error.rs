use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error(
        "unsupported image shape {shape:?}: expected height x width, height x width x 3, or height x width x 4"
    )]
    UnsupportedShape { shape: Vec<usize> },

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },
}
