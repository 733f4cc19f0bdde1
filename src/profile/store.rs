use std::fs;
use std::path::{Path, PathBuf};

use super::{ProfileError, Result, Settings, sanitize_profile_name};

const DEFAULT_PROFILE_DIR: &str = "profiles";

/// Flat directory of `<name>.json` presets. Names are sanitized before
/// they touch the filesystem, on save and on load alike, so a stored
/// profile can never point outside the directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_PROFILE_DIR),
        }
    }
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists `settings` under the sanitized name, overwriting any
    /// existing profile with that name. Returns the name actually used.
    pub fn save(&self, name: &str, settings: &Settings) -> Result<String> {
        let safe = sanitize_profile_name(name).ok_or(ProfileError::InvalidName)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{safe}.json"));
        let serialized = serde_json::to_string_pretty(settings)?;
        fs::write(&path, serialized)?;
        log::info!("saved profile `{safe}` to {}", path.display());
        Ok(safe)
    }

    /// Profile names in sorted order. A missing directory reads as
    /// having no profiles.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            })
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn load(&self, name: &str) -> Result<Settings> {
        let safe = sanitize_profile_name(name).ok_or(ProfileError::InvalidName)?;
        let path = self.dir.join(format!("{safe}.json"));
        if !path.exists() {
            return Err(ProfileError::NotFound(safe));
        }
        let raw = fs::read_to_string(&path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }
}
