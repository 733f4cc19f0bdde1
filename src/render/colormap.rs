use std::fmt;
use std::str::FromStr;

use super::{RenderError, Result};

const TAB20: [[u8; 3]; 20] = [
    [31, 119, 180],
    [174, 199, 232],
    [255, 127, 14],
    [255, 187, 120],
    [44, 160, 44],
    [152, 223, 138],
    [214, 39, 40],
    [255, 152, 150],
    [148, 103, 189],
    [197, 176, 213],
    [140, 86, 75],
    [196, 156, 148],
    [227, 119, 194],
    [247, 182, 210],
    [127, 127, 127],
    [199, 199, 199],
    [188, 189, 34],
    [219, 219, 141],
    [23, 190, 207],
    [158, 218, 229],
];

const TAB20B: [[u8; 3]; 20] = [
    [57, 59, 121],
    [82, 84, 163],
    [107, 110, 207],
    [156, 158, 222],
    [99, 121, 57],
    [140, 162, 82],
    [181, 207, 107],
    [206, 219, 156],
    [140, 109, 49],
    [189, 158, 57],
    [231, 186, 82],
    [231, 203, 148],
    [132, 60, 57],
    [173, 73, 74],
    [214, 97, 107],
    [231, 150, 156],
    [123, 65, 115],
    [165, 81, 148],
    [206, 109, 189],
    [222, 158, 214],
];

const TAB20C: [[u8; 3]; 20] = [
    [49, 130, 189],
    [107, 174, 214],
    [158, 202, 225],
    [198, 219, 239],
    [230, 85, 13],
    [253, 141, 60],
    [253, 174, 107],
    [253, 208, 162],
    [49, 163, 84],
    [116, 196, 118],
    [161, 217, 155],
    [199, 233, 192],
    [117, 107, 177],
    [158, 154, 200],
    [188, 189, 220],
    [218, 218, 235],
    [99, 99, 99],
    [150, 150, 150],
    [189, 189, 189],
    [217, 217, 217],
];

const VIRIDIS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

const PLASMA: [[u8; 3]; 5] = [
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];

const INFERNO: [[u8; 3]; 5] = [
    [0, 0, 4],
    [87, 16, 110],
    [188, 55, 84],
    [249, 142, 9],
    [252, 255, 164],
];

const MAGMA: [[u8; 3]; 5] = [
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [252, 137, 97],
    [252, 253, 191],
];

const CIVIDIS: [[u8; 3]; 5] = [
    [0, 32, 76],
    [61, 78, 108],
    [124, 123, 120],
    [187, 173, 108],
    [255, 234, 70],
];

const TWILIGHT: [[u8; 3]; 5] = [
    [226, 217, 226],
    [117, 121, 186],
    [47, 20, 54],
    [163, 75, 87],
    [226, 217, 226],
];

/// Palette used to color the label mask. Qualitative palettes (the
/// tab20 family) cycle a fixed table; the rest are sampled ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Tab20,
    Tab20b,
    Tab20c,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Hsv,
    Twilight,
    Gray,
}

impl Colormap {
    pub const ALL: [Colormap; 11] = [
        Colormap::Tab20,
        Colormap::Tab20b,
        Colormap::Tab20c,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cividis,
        Colormap::Hsv,
        Colormap::Twilight,
        Colormap::Gray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Tab20 => "tab20",
            Colormap::Tab20b => "tab20b",
            Colormap::Tab20c => "tab20c",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Hsv => "hsv",
            Colormap::Twilight => "twilight",
            Colormap::Gray => "gray",
        }
    }

    /// Color for a positive label.
    pub fn label_color(&self, label: u32, max_label: u32) -> [u8; 3] {
        let index = label.saturating_sub(1) as usize;
        match self {
            Colormap::Tab20 => TAB20[index % TAB20.len()],
            Colormap::Tab20b => TAB20B[index % TAB20B.len()],
            Colormap::Tab20c => TAB20C[index % TAB20C.len()],
            _ => self.sample(label as f32 / max_label.max(1) as f32),
        }
    }

    /// Color at position `t` in [0, 1] along the palette.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Tab20 => TAB20[(t * (TAB20.len() - 1) as f32).round() as usize],
            Colormap::Tab20b => TAB20B[(t * (TAB20B.len() - 1) as f32).round() as usize],
            Colormap::Tab20c => TAB20C[(t * (TAB20C.len() - 1) as f32).round() as usize],
            Colormap::Viridis => interpolate(&VIRIDIS, t),
            Colormap::Plasma => interpolate(&PLASMA, t),
            Colormap::Inferno => interpolate(&INFERNO, t),
            Colormap::Magma => interpolate(&MAGMA, t),
            Colormap::Cividis => interpolate(&CIVIDIS, t),
            Colormap::Twilight => interpolate(&TWILIGHT, t),
            Colormap::Hsv => hsv_to_rgb(t * 360.0, 1.0, 1.0),
            Colormap::Gray => {
                let level = (t * 255.0).round() as u8;
                [level, level, level]
            }
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "tab20" => Ok(Colormap::Tab20),
            "tab20b" => Ok(Colormap::Tab20b),
            "tab20c" => Ok(Colormap::Tab20c),
            "viridis" => Ok(Colormap::Viridis),
            "plasma" => Ok(Colormap::Plasma),
            "inferno" => Ok(Colormap::Inferno),
            "magma" => Ok(Colormap::Magma),
            "cividis" => Ok(Colormap::Cividis),
            "hsv" => Ok(Colormap::Hsv),
            "twilight" => Ok(Colormap::Twilight),
            "gray" => Ok(Colormap::Gray),
            _ => Err(RenderError::UnknownColormap(value.to_string())),
        }
    }
}

fn interpolate(anchors: &[[u8; 3]], t: f32) -> [u8; 3] {
    let scaled = t * (anchors.len() - 1) as f32;
    let index = (scaled.floor() as usize).min(anchors.len() - 2);
    let fraction = scaled - index as f32;
    let low = anchors[index];
    let high = anchors[index + 1];
    let mut color = [0_u8; 3];
    for (slot, (a, b)) in color.iter_mut().zip(low.iter().zip(high.iter())) {
        *slot = (*a as f32 + (*b as f32 - *a as f32) * fraction).round() as u8;
    }
    color
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = (hue / 60.0) % 6.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}
