use thiserror::Error;

pub type Result<T> = std::result::Result<T, SegmentError>;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("segmentation failed: {0}. Check your input image and parameters.")]
    Failed(String),

    #[error("invalid segmentation parameters: {0}")]
    InvalidParams(String),

    #[error("unknown model `{0}`: expected cyto3, cyto2, cyto, or nuclei")]
    UnknownModel(String),
}
