//! Plugin catalog
//!
//! A plugin is a directory carrying a `.claude-plugin/plugin.json`
//! manifest plus optional component directories (`commands/`, `agents/`,
//! `skills/`, `hooks/`, an `.mcp.json`). Plugins live under
//! `~/.claude/plugins` (user) and `./.claude/plugins` (project); the
//! catalog surface mirrors the skill catalog, and removal requires
//! explicit confirmation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{ConfigError, ConfigResult, Confirmation};

use super::catalog::{sorted_entries, AssetScope};

const MANIFEST_DIR: &str = ".claude-plugin";
const MANIFEST_FILE: &str = "plugin.json";

fn manifest_path(plugin_dir: &Path) -> PathBuf {
    plugin_dir.join(MANIFEST_DIR).join(MANIFEST_FILE)
}

/// The `plugin.json` manifest
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PluginManifest {
    /// Plugin name
    #[serde(default)]
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Semantic version string
    #[serde(default)]
    pub version: String,
    /// Search keywords
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One plugin as listed
#[derive(Debug, Clone, PartialEq)]
pub struct PluginEntry {
    /// Name from the manifest, falling back to the directory name
    pub name: String,
    /// Directory name on disk
    pub directory: String,
    /// Scope the plugin was found in
    pub scope: AssetScope,
    /// Full path to the plugin directory
    pub path: PathBuf,
    /// Description from the manifest (empty if absent)
    pub description: String,
    /// Version from the manifest (empty if absent)
    pub version: String,
}

/// Catalog over the user and project plugin directories
#[derive(Debug, Clone)]
pub struct PluginCatalog {
    user_dir: Option<PathBuf>,
    project_dir: PathBuf,
}

impl PluginCatalog {
    /// Catalog for the conventional directories of a project
    pub fn new(project_root: &Path) -> Self {
        Self {
            user_dir: dirs::home_dir().map(|h| h.join(".claude").join("plugins")),
            project_dir: project_root.join(".claude").join("plugins"),
        }
    }

    /// Catalog over explicit directories (used by tests)
    pub fn with_dirs(user_dir: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: Some(user_dir.into()),
            project_dir: project_dir.into(),
        }
    }

    fn dir_for(&self, scope: AssetScope) -> Option<&Path> {
        match scope {
            AssetScope::User => self.user_dir.as_deref(),
            AssetScope::Project => Some(&self.project_dir),
        }
    }

    /// List plugins, optionally restricted to one scope. Sorted by
    /// directory name within each scope; a missing directory is empty.
    /// A directory without a manifest is not a plugin and is skipped.
    pub fn list(&self, scope: Option<AssetScope>) -> ConfigResult<Vec<PluginEntry>> {
        let mut entries = Vec::new();

        for candidate in AssetScope::search_order() {
            if scope.is_some() && scope != Some(candidate) {
                continue;
            }
            let Some(dir) = self.dir_for(candidate) else {
                continue;
            };
            if !dir.exists() {
                continue;
            }

            for path in sorted_entries(dir)? {
                if !path.is_dir() || !manifest_path(&path).exists() {
                    continue;
                }
                entries.push(read_entry(&path, candidate));
            }
        }

        Ok(entries)
    }

    /// Find a plugin by directory name. Unscoped lookups check the user
    /// scope before the project scope.
    pub fn find(&self, name: &str, scope: Option<AssetScope>) -> Option<PluginEntry> {
        for candidate in AssetScope::search_order() {
            if scope.is_some() && scope != Some(candidate) {
                continue;
            }
            let Some(dir) = self.dir_for(candidate) else {
                continue;
            };
            let path = dir.join(name);
            if manifest_path(&path).exists() {
                return Some(read_entry(&path, candidate));
            }
        }
        None
    }

    /// Remove a plugin directory. Requires confirmation.
    pub fn remove(
        &self,
        name: &str,
        scope: Option<AssetScope>,
        confirm: Confirmation,
    ) -> ConfigResult<PluginEntry> {
        let entry = self
            .find(name, scope)
            .ok_or_else(|| ConfigError::NotFound(format!("plugin '{name}'")))?;
        confirm.require(&format!("remove plugin '{name}' ({} scope)", entry.scope))?;

        fs::remove_dir_all(&entry.path)?;
        tracing::info!("Removed plugin '{}' from {} scope", name, entry.scope);
        Ok(entry)
    }
}

fn read_entry(path: &Path, scope: AssetScope) -> PluginEntry {
    let directory = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // An unreadable manifest degrades to the directory name, like a
    // skill with missing frontmatter
    let manifest: PluginManifest = fs::read_to_string(manifest_path(path))
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default();

    PluginEntry {
        name: if manifest.name.is_empty() {
            directory.clone()
        } else {
            manifest.name
        },
        directory,
        scope,
        path: path.to_path_buf(),
        description: manifest.description,
        version: manifest.version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_catalog() -> (PluginCatalog, TempDir) {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user-plugins");
        let project = temp.path().join("project-plugins");
        fs::create_dir_all(&user).unwrap();
        fs::create_dir_all(&project).unwrap();
        (PluginCatalog::with_dirs(user, project), temp)
    }

    fn write_plugin(catalog: &PluginCatalog, scope: AssetScope, dir: &str, name: &str, desc: &str) {
        let base = catalog.dir_for(scope).unwrap().join(dir).join(MANIFEST_DIR);
        fs::create_dir_all(&base).unwrap();
        fs::write(
            base.join(MANIFEST_FILE),
            format!(r#"{{ "name": "{name}", "description": "{desc}", "version": "1.0.0" }}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_list_sorted_and_scope_tagged() {
        let (catalog, _temp) = create_test_catalog();
        write_plugin(&catalog, AssetScope::User, "zeta", "zeta", "last");
        write_plugin(&catalog, AssetScope::User, "alpha", "alpha", "first");
        write_plugin(&catalog, AssetScope::Project, "beta", "beta", "project one");

        let all = catalog.list(None).unwrap();
        let summary: Vec<(String, AssetScope)> =
            all.iter().map(|e| (e.directory.clone(), e.scope)).collect();
        assert_eq!(
            summary,
            vec![
                ("alpha".to_string(), AssetScope::User),
                ("zeta".to_string(), AssetScope::User),
                ("beta".to_string(), AssetScope::Project),
            ]
        );
        assert_eq!(all[0].version, "1.0.0");

        let project_only = catalog.list(Some(AssetScope::Project)).unwrap();
        assert_eq!(project_only.len(), 1);
        assert_eq!(project_only[0].description, "project one");
    }

    #[test]
    fn test_directory_without_manifest_ignored() {
        let (catalog, _temp) = create_test_catalog();
        fs::create_dir_all(catalog.dir_for(AssetScope::User).unwrap().join("not-a-plugin"))
            .unwrap();

        assert!(catalog.list(None).unwrap().is_empty());
        assert!(catalog.find("not-a-plugin", None).is_none());
    }

    #[test]
    fn test_find_checks_user_before_project() {
        let (catalog, _temp) = create_test_catalog();
        write_plugin(&catalog, AssetScope::User, "dup", "dup", "user copy");
        write_plugin(&catalog, AssetScope::Project, "dup", "dup", "project copy");

        let found = catalog.find("dup", None).unwrap();
        assert_eq!(found.scope, AssetScope::User);

        let found = catalog.find("dup", Some(AssetScope::Project)).unwrap();
        assert_eq!(found.description, "project copy");
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let (catalog, _temp) = create_test_catalog();
        write_plugin(&catalog, AssetScope::Project, "doomed", "doomed", "");

        let err = catalog
            .remove("doomed", None, Confirmation::Unconfirmed)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ConfirmationRequired(_)));
        // Nothing was touched
        assert!(catalog.find("doomed", None).is_some());

        catalog.remove("doomed", None, Confirmation::Confirmed).unwrap();
        assert!(catalog.find("doomed", None).is_none());
    }

    #[test]
    fn test_remove_missing_plugin_is_not_found() {
        let (catalog, _temp) = create_test_catalog();
        let err = catalog
            .remove("ghost", None, Confirmation::Confirmed)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_malformed_manifest_falls_back_to_directory_name() {
        let (catalog, _temp) = create_test_catalog();
        let base = catalog
            .dir_for(AssetScope::Project)
            .unwrap()
            .join("broken")
            .join(MANIFEST_DIR);
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join(MANIFEST_FILE), "{ not json").unwrap();

        let entry = catalog.find("broken", None).unwrap();
        assert_eq!(entry.name, "broken");
        assert_eq!(entry.description, "");
    }
}
