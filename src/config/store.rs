//! Config persistence collaborator.
//!
//! Runtime toggles (streaming mode) write the config back through a
//! [`ConfigStore`] so the setting survives restarts.

use super::{Config, ConfigError};
use std::path::PathBuf;

/// Persists configuration changes made at runtime.
pub trait ConfigStore: Send + Sync {
    /// Write `config` to durable storage.
    fn persist(&self, config: &Config) -> Result<(), ConfigError>;
}

/// Writes the config as pretty TOML to a fixed path.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ConfigStore for TomlFileStore {
    fn persist(&self, config: &Config) -> Result<(), ConfigError> {
        config.save(&self.path)
    }
}

/// Discards every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl ConfigStore for NullStore {
    fn persist(&self, _config: &Config) -> Result<(), ConfigError> {
        Ok(())
    }
}
