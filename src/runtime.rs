//! Application runtime: the services the CLI and the desktop UI share.

mod context;
mod error;
mod io_service;
mod pipeline;
mod profile_service;
mod segment_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use io_service::IoService;
pub use pipeline::{RunOutcome, run_segmentation};
pub use profile_service::ProfileService;
pub use segment_service::SegmentService;
