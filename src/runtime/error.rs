use thiserror::Error;

use crate::export::ExportError;
use crate::formats::LoadError;
use crate::model::DataError;
use crate::profile::ProfileError;
use crate::render::RenderError;
use crate::segment::SegmentError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("image load error: {0}")]
    Load(#[from] LoadError),

    #[error("image data error: {0}")]
    Data(#[from] DataError),

    // Segmentation errors already carry the user-facing wording.
    #[error("{0}")]
    Segment(#[from] SegmentError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}
