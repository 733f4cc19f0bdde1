use std::fmt;
use std::sync::Arc;

use crate::model::{LabelMask, NormalizedImage};
use crate::segment::{IntensityBackend, SegmentError, SegmentParams, SegmentationBackend};

use super::error::Result;

/// Owns the active segmentation backend and normalizes its failures:
/// whatever goes wrong inside a backend surfaces as one "segmentation
/// failed" condition carrying the original message.
#[derive(Clone)]
pub struct SegmentService {
    backend: Arc<dyn SegmentationBackend>,
}

impl fmt::Debug for SegmentService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SegmentService")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for SegmentService {
    fn default() -> Self {
        Self {
            backend: Arc::new(IntensityBackend),
        }
    }
}

impl SegmentService {
    pub fn with_backend(backend: Arc<dyn SegmentationBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Validates the parameters, runs the backend and checks that the
    /// returned mask matches the image dimensions.
    pub fn segment(&self, image: &NormalizedImage, params: &SegmentParams) -> Result<LabelMask> {
        params.validate()?;
        let masks = self
            .backend
            .segment(image, params)
            .map_err(|error| match error {
                SegmentError::Failed(_) => error,
                other => SegmentError::Failed(other.to_string()),
            })?;
        if masks.dims() != image.dims() {
            let (mask_height, mask_width) = masks.dims();
            return Err(SegmentError::Failed(format!(
                "backend `{}` returned a {mask_height}x{mask_width} mask for a {}x{} image",
                self.backend.name(),
                image.height(),
                image.width()
            ))
            .into());
        }
        Ok(masks)
    }
}
