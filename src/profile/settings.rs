use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::render::{Colormap, DisplayMode};
use crate::segment::{ModelKind, SegmentParams};

use super::{ProfileError, Result};

/// One saved parameter preset. The field set mirrors the run form and
/// the JSON field names are the stable on-disk schema for profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub model_type: ModelKind,
    pub diameter: f32,
    pub flow_threshold: f32,
    pub display_channel: DisplayMode,
    pub seg_channel1: u8,
    pub seg_channel2: u8,
    pub cmap: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_type: ModelKind::Cyto3,
            diameter: 30.0,
            flow_threshold: SegmentParams::DEFAULT_FLOW_THRESHOLD,
            display_channel: DisplayMode::Rgb,
            seg_channel1: 0,
            seg_channel2: 0,
            cmap: Colormap::Tab20b.name().to_string(),
        }
    }
}

impl Settings {
    /// Range and membership checks shared by profile loading and run
    /// submission.
    pub fn validate(&self) -> Result<()> {
        if !(1.0..=100.0).contains(&self.diameter) {
            return Err(ProfileError::Validation(format!(
                "diameter {} outside the range 1 to 100",
                self.diameter
            )));
        }
        if !(0.0..=1.0).contains(&self.flow_threshold) {
            return Err(ProfileError::Validation(format!(
                "flow threshold {} outside the range 0 to 1",
                self.flow_threshold
            )));
        }
        if self.seg_channel1 > 3 {
            return Err(ProfileError::Validation(format!(
                "segmentation channel {} out of range 0..=3",
                self.seg_channel1
            )));
        }
        if self.seg_channel2 > 3 {
            return Err(ProfileError::Validation(format!(
                "nuclear channel {} out of range 0..=3",
                self.seg_channel2
            )));
        }
        if Colormap::from_str(&self.cmap).is_err() {
            return Err(ProfileError::Validation(format!(
                "unknown colormap `{}`",
                self.cmap
            )));
        }
        Ok(())
    }

    pub fn colormap(&self) -> Result<Colormap> {
        Colormap::from_str(&self.cmap).map_err(|error| ProfileError::Validation(error.to_string()))
    }

    pub fn segment_params(&self) -> SegmentParams {
        SegmentParams {
            model: self.model_type,
            channels: [self.seg_channel1, self.seg_channel2],
            diameter: Some(self.diameter),
            flow_threshold: Some(self.flow_threshold),
        }
    }

    /// One-line recap shown next to results and echoed by the CLI.
    pub fn summary(&self) -> String {
        format!(
            "Model: {}, Diameter: {}, Flow Threshold: {}, Display: {}, Seg Ch1: {}, Seg Ch2: {}, Colormap: {}",
            self.model_type,
            self.diameter,
            self.flow_threshold,
            self.display_channel,
            self.seg_channel1,
            self.seg_channel2,
            self.cmap
        )
    }
}
