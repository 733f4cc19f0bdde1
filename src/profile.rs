mod error;
mod sanitize;
mod settings;
mod store;

#[cfg(test)]
mod tests;

pub use error::{ProfileError, Result};
pub use sanitize::sanitize_profile_name;
pub use settings::Settings;
pub use store::ProfileStore;
