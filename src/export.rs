mod error;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{ExportError, Result};
pub use writer::{ExportBundle, ExportWriter};
