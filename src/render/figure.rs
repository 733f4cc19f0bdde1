use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::model::{LabelMask, NormalizedImage, OutlineMap};

use super::{Colormap, RenderError, Result};

const PANEL_GUTTER: u32 = 8;
const COMPOSITE_BACKGROUND: Rgb<u8> = Rgb([24, 24, 24]);

/// How the original-image panel presents the loaded pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[serde(rename = "RGB")]
    Rgb,
    Grayscale,
    Red,
    Green,
    Blue,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::Rgb,
        DisplayMode::Grayscale,
        DisplayMode::Red,
        DisplayMode::Green,
        DisplayMode::Blue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Rgb => "RGB",
            DisplayMode::Grayscale => "Grayscale",
            DisplayMode::Red => "Red",
            DisplayMode::Green => "Green",
            DisplayMode::Blue => "Blue",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "rgb" => Ok(DisplayMode::Rgb),
            "grayscale" => Ok(DisplayMode::Grayscale),
            "red" => Ok(DisplayMode::Red),
            "green" => Ok(DisplayMode::Green),
            "blue" => Ok(DisplayMode::Blue),
            _ => Err(RenderError::UnknownDisplayMode(value.to_string())),
        }
    }
}

/// Rendered panels for one segmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub original: RgbImage,
    pub masks: RgbImage,
    pub outlines: RgbImage,
    /// The three panels side by side on a dark background.
    pub composite: RgbImage,
}

pub fn render_figure(
    image: &NormalizedImage,
    masks: &LabelMask,
    display: DisplayMode,
    colormap: Colormap,
) -> Result<Figure> {
    let (height, width) = image.dims();
    let (mask_height, mask_width) = masks.dims();
    if (mask_height, mask_width) != (height, width) {
        return Err(RenderError::MaskSizeMismatch {
            mask_height,
            mask_width,
            image_height: height,
            image_width: width,
        });
    }

    let original = original_panel(image, display);
    let mask_image = mask_panel(masks, colormap);
    let outline_image = outline_panel(&masks.outlines());
    let composite = compose(&original, &mask_image, &outline_image);
    Ok(Figure {
        original,
        masks: mask_image,
        outlines: outline_image,
        composite,
    })
}

fn original_panel(image: &NormalizedImage, display: DisplayMode) -> RgbImage {
    let (height, width) = image.dims();
    match display {
        DisplayMode::Rgb => RgbImage::from_raw(width as u32, height as u32, image.to_rgb_bytes())
            .expect("buffer length matches dimensions"),
        DisplayMode::Grayscale => {
            let mean = image.mean_channel();
            RgbImage::from_fn(width as u32, height as u32, |x, y| {
                let level = mean[[y as usize, x as usize]].round() as u8;
                Rgb([level, level, level])
            })
        }
        DisplayMode::Red | DisplayMode::Green | DisplayMode::Blue => {
            let channel = match display {
                DisplayMode::Red => 0,
                DisplayMode::Green => 1,
                _ => 2,
            };
            let data = image.data();
            RgbImage::from_fn(width as u32, height as u32, |x, y| {
                let level = data[[y as usize, x as usize, channel]];
                Rgb([level, level, level])
            })
        }
    }
}

/// Colored label mask; background stays black.
pub fn mask_panel(masks: &LabelMask, colormap: Colormap) -> RgbImage {
    let (height, width) = masks.dims();
    let max_label = masks.max_label();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let label = masks.labels[[y as usize, x as usize]];
        if label == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb(colormap.label_color(label, max_label))
        }
    })
}

fn outline_panel(outlines: &OutlineMap) -> RgbImage {
    let (height, width) = outlines.dims();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        if outlines.is_boundary(y as usize, x as usize) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    })
}

fn compose(original: &RgbImage, masks: &RgbImage, outlines: &RgbImage) -> RgbImage {
    let width = original.width();
    let height = original.height();
    let total_width = width * 3 + PANEL_GUTTER * 2;
    let mut composite = RgbImage::from_pixel(total_width, height, COMPOSITE_BACKGROUND);
    imageops::replace(&mut composite, original, 0, 0);
    imageops::replace(&mut composite, masks, i64::from(width + PANEL_GUTTER), 0);
    imageops::replace(&mut composite, outlines, i64::from((width + PANEL_GUTTER) * 2), 0);
    composite
}
