use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Result, SegmentError};

/// Pretrained model family a run is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Cyto3,
    Cyto2,
    Cyto,
    Nuclei,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Cyto3,
        ModelKind::Cyto2,
        ModelKind::Cyto,
        ModelKind::Nuclei,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ModelKind::Cyto3 => "cyto3",
            ModelKind::Cyto2 => "cyto2",
            ModelKind::Cyto => "cyto",
            ModelKind::Nuclei => "nuclei",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelKind::Cyto3 => "generalist cytoplasm model, third generation",
            ModelKind::Cyto2 => "cytoplasm model trained with user-submitted data",
            ModelKind::Cyto => "original cytoplasm model",
            ModelKind::Nuclei => "nucleus model",
        }
    }

    pub fn default_diameter(&self) -> f32 {
        match self {
            ModelKind::Nuclei => 17.0,
            _ => 30.0,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelKind {
    type Err = SegmentError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "cyto3" => Ok(ModelKind::Cyto3),
            "cyto2" => Ok(ModelKind::Cyto2),
            "cyto" => Ok(ModelKind::Cyto),
            "nuclei" => Ok(ModelKind::Nuclei),
            other => Err(SegmentError::UnknownModel(other.to_string())),
        }
    }
}

/// Inputs for one segmentation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentParams {
    pub model: ModelKind,
    /// Channels driving segmentation: 0 = grayscale, 1 = red, 2 = green,
    /// 3 = blue. The second entry names the nuclear channel used by
    /// cytoplasm models.
    pub channels: [u8; 2],
    /// Expected object diameter in pixels; `None` uses the model default.
    pub diameter: Option<f32>,
    /// Flow error tolerance. Lower values reject more candidates.
    pub flow_threshold: Option<f32>,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            model: ModelKind::Cyto3,
            channels: [0, 0],
            diameter: None,
            flow_threshold: None,
        }
    }
}

impl SegmentParams {
    pub const DEFAULT_FLOW_THRESHOLD: f32 = 0.4;

    pub fn validate(&self) -> Result<()> {
        for channel in self.channels {
            if channel > 3 {
                return Err(SegmentError::InvalidParams(format!(
                    "channel index {channel} out of range 0..=3"
                )));
            }
        }
        if let Some(diameter) = self.diameter {
            if !diameter.is_finite() || diameter <= 0.0 {
                return Err(SegmentError::InvalidParams(format!(
                    "diameter {diameter} must be a positive number"
                )));
            }
        }
        if let Some(flow) = self.flow_threshold {
            if !flow.is_finite() {
                return Err(SegmentError::InvalidParams(format!(
                    "flow threshold {flow} must be finite"
                )));
            }
        }
        Ok(())
    }

    pub fn effective_diameter(&self) -> f32 {
        self.diameter.unwrap_or(self.model.default_diameter())
    }

    pub fn effective_flow_threshold(&self) -> f32 {
        self.flow_threshold.unwrap_or(Self::DEFAULT_FLOW_THRESHOLD)
    }
}
