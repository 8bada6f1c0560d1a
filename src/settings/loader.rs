//! Settings loading and the merged scope view
//!
//! Settings files are read fresh at evaluation time; nothing is cached.
//! A malformed file fails the whole load and names the offending path.

use std::fs;
use std::path::Path;

use crate::core::{ConfigError, ConfigResult};

use super::model::Settings;
use super::scope::SettingsScope;

/// Load a single settings file.
///
/// A missing file is an empty document, not an error. Invalid JSON fails
/// fast with the file path in the error.
pub fn load_settings(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

/// An ordered collection of settings layers, one per scope.
///
/// Layers are kept sorted by scope precedence (managed first, user last)
/// regardless of insertion order, so evaluation over `layers()` is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct ScopeSet {
    layers: Vec<(SettingsScope, Settings)>,
}

impl ScopeSet {
    /// Create an empty scope set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, keeping precedence order
    pub fn push(&mut self, scope: SettingsScope, settings: Settings) {
        self.layers.push((scope, settings));
        self.layers.sort_by_key(|(scope, _)| *scope);
    }

    /// Builder-style `push`
    pub fn with_layer(mut self, scope: SettingsScope, settings: Settings) -> Self {
        self.push(scope, settings);
        self
    }

    /// Load every file-backed scope from its conventional path.
    ///
    /// Scopes without a backing file (cli-flag, or user without a home
    /// directory) contribute nothing.
    pub fn from_disk(project_root: &Path) -> ConfigResult<Self> {
        let mut set = Self::new();
        for scope in SettingsScope::precedence() {
            let Some(path) = scope.settings_path(project_root) else {
                continue;
            };
            let settings = load_settings(&path)?;
            if !settings.is_empty() {
                tracing::debug!("Loaded {} settings from {}", scope, path.display());
                set.push(scope, settings);
            }
        }
        Ok(set)
    }

    /// Layers in precedence order, highest first
    pub fn layers(&self) -> impl Iterator<Item = (SettingsScope, &Settings)> {
        self.layers.iter().map(|(scope, settings)| (*scope, settings))
    }

    /// The first layer for a given scope, if any
    pub fn get(&self, scope: SettingsScope) -> Option<&Settings> {
        self.layers
            .iter()
            .find(|(s, _)| *s == scope)
            .map(|(_, settings)| settings)
    }

    /// Whether no layer holds any settings
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_settings() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("nope.json")).unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_malformed_json_fails_fast_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ \"permissions\": ").unwrap();

        let err = load_settings(&path).unwrap_err();
        match err {
            ConfigError::MalformedJson { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_layers_sorted_by_precedence() {
        let set = ScopeSet::new()
            .with_layer(SettingsScope::User, Settings::default())
            .with_layer(SettingsScope::Managed, Settings::default())
            .with_layer(SettingsScope::Project, Settings::default());

        let order: Vec<SettingsScope> = set.layers().map(|(s, _)| s).collect();
        assert_eq!(
            order,
            vec![
                SettingsScope::Managed,
                SettingsScope::Project,
                SettingsScope::User
            ]
        );
    }

    #[test]
    fn test_from_disk_reads_project_scopes() {
        let temp = TempDir::new().unwrap();
        let claude_dir = temp.path().join(".claude");
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(
            claude_dir.join("settings.json"),
            r#"{ "permissions": { "allow": ["Bash(git:*)"] } }"#,
        )
        .unwrap();
        fs::write(
            claude_dir.join("settings.local.json"),
            r#"{ "model": "opus" }"#,
        )
        .unwrap();

        let set = ScopeSet::from_disk(temp.path()).unwrap();
        assert_eq!(
            set.get(SettingsScope::Project).unwrap().permissions.allow,
            vec!["Bash(git:*)"]
        );
        assert_eq!(
            set.get(SettingsScope::Local).unwrap().model.as_deref(),
            Some("opus")
        );
    }
}
