use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid profile name")]
    InvalidName,

    #[error("profile `{0}` not found")]
    NotFound(String),

    #[error("invalid JSON in profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Validation(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
