use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(
        "invalid colormap `{0}`: must be one of tab20, tab20b, tab20c, viridis, plasma, inferno, magma, cividis, hsv, twilight, gray"
    )]
    UnknownColormap(String),

    #[error("invalid display channel `{0}`: must be one of RGB, Grayscale, Red, Green, Blue")]
    UnknownDisplayMode(String),

    #[error(
        "mask size {mask_height}x{mask_width} does not match image size {image_height}x{image_width}"
    )]
    MaskSizeMismatch {
        mask_height: usize,
        mask_width: usize,
        image_height: usize,
        image_width: usize,
    },
}
