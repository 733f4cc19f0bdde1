use std::path::PathBuf;
use std::sync::Arc;

use crate::model::NormalizedImage;
use crate::profile::Settings;

/// How the segmentation channel controls are presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChannelConfig {
    Grayscale,
    OwnChannels,
}

impl ChannelConfig {
    pub(super) const ALL: [ChannelConfig; 2] =
        [ChannelConfig::Grayscale, ChannelConfig::OwnChannels];

    pub(super) fn label(self) -> &'static str {
        match self {
            ChannelConfig::Grayscale => "grayscale",
            ChannelConfig::OwnChannels => "own channels",
        }
    }
}

/// The channel dropdowns only appear once the user opts into picking
/// channels; the grayscale preset hides them.
pub(super) fn channel_selectors_visible(config: ChannelConfig) -> bool {
    config == ChannelConfig::OwnChannels
}

pub(super) fn channel_label(channel: u8) -> &'static str {
    match channel {
        0 => "0 (grayscale)",
        1 => "1 (red)",
        2 => "2 (green)",
        3 => "3 (blue)",
        _ => "?",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A transient message shown under the run controls.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Notice {
    pub(super) kind: NoticeKind,
    pub(super) text: String,
}

impl Notice {
    pub(super) fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub(super) fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub(super) fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct RunResults {
    pub(super) cell_count: usize,
    pub(super) summary: String,
    pub(super) files: Vec<PathBuf>,
}

/// Everything the window needs to redraw itself, independent of egui.
#[derive(Debug)]
pub(super) struct SessionState {
    pub(super) settings: Settings,
    pub(super) channel_config: ChannelConfig,
    pub(super) image_path: Option<PathBuf>,
    pub(super) image: Option<Arc<NormalizedImage>>,
    pub(super) profile_name: String,
    pub(super) selected_profile: Option<String>,
    pub(super) profiles: Vec<String>,
    pub(super) notice: Option<Notice>,
    pub(super) status: String,
    pub(super) results: Option<RunResults>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            channel_config: ChannelConfig::Grayscale,
            image_path: None,
            image: None,
            profile_name: String::new(),
            selected_profile: None,
            profiles: Vec::new(),
            notice: None,
            status: "Ready. Load an image to begin.".to_string(),
            results: None,
        }
    }
}
