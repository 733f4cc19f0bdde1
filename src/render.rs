mod colormap;
mod error;
mod figure;


pub use colormap::Colormap;
pub use error::{RenderError, Result};
pub use figure::{DisplayMode, Figure, mask_panel, render_figure};
