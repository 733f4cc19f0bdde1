use crate::profile::{ProfileStore, Settings};

use super::error::Result;

/// Service for saving and restoring named parameter profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileService {
    store: ProfileStore,
}

impl ProfileService {
    pub fn with_store(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Persists the settings under a sanitized version of `name` and
    /// returns the name actually used.
    pub fn save(&self, name: &str, settings: &Settings) -> Result<String> {
        Ok(self.store.save(name, settings)?)
    }

    pub fn list(&self) -> Vec<String> {
        self.store.list()
    }

    pub fn load(&self, name: &str) -> Result<Settings> {
        Ok(self.store.load(name)?)
    }
}
