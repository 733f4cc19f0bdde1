use crate::model::{LabelMask, NormalizedImage};

use super::{Result, SegmentParams};

/// Seam between the pipeline and whichever segmenter produces masks.
/// Implementations take the normalized RGB image and must return a
/// label mask with the same height and width.
pub trait SegmentationBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn segment(&self, image: &NormalizedImage, params: &SegmentParams) -> Result<LabelMask>;
}
