//! File-backed settings mutation
//!
//! All writes are whole-file: read, merge in memory, write atomically.
//! The write goes to a temp file in the same directory and is renamed
//! over the target so a crash never leaves partial JSON behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::{ConfigError, ConfigResult};

use super::loader::load_settings;
use super::model::Settings;
use super::scope::SettingsScope;

/// Handle to one settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store for an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for a scope's conventional file.
    ///
    /// Fails for scopes that are not writable (managed, cli-flag).
    pub fn for_scope(scope: SettingsScope, project_root: &Path) -> ConfigResult<Self> {
        if !scope.is_writable() {
            return Err(ConfigError::ScopeReadOnly(scope.to_string()));
        }
        let path = scope
            .settings_path(project_root)
            .ok_or_else(|| ConfigError::ScopeReadOnly(scope.to_string()))?;
        Ok(Self::new(path))
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current settings (missing file = empty document)
    pub fn read(&self) -> ConfigResult<Settings> {
        load_settings(&self.path)
    }

    /// Read, apply a mutation in memory, write the whole file atomically.
    ///
    /// Returns the settings as written.
    pub fn update<F>(&self, mutate: F) -> ConfigResult<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.read()?;
        mutate(&mut settings);
        self.write(&settings)?;
        Ok(settings)
    }

    /// Write a full settings document atomically
    pub fn write(&self, settings: &Settings) -> ConfigResult<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| ConfigError::other(format!("Failed to serialize settings: {e}")))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(json.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|e| ConfigError::Io(e.error))?;

        tracing::debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}
