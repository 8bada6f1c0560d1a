//! Subagent catalog
//!
//! Subagents are single Markdown files with frontmatter under an
//! `agents/` directory, one per scope. Same search order and
//! confirmation rules as skills.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ConfigError, ConfigResult, Confirmation};

use super::catalog::AssetScope;
use super::frontmatter::Frontmatter;

/// One subagent as listed
#[derive(Debug, Clone, PartialEq)]
pub struct SubagentEntry {
    /// Name from frontmatter, falling back to the file stem
    pub name: String,
    /// File name on disk (with `.md`)
    pub file_name: String,
    /// Scope the subagent was found in
    pub scope: AssetScope,
    /// Full path to the file
    pub path: PathBuf,
    /// Description from frontmatter (empty if absent)
    pub description: String,
}

/// Catalog over the user and project `agents/` directories
#[derive(Debug, Clone)]
pub struct SubagentCatalog {
    user_dir: Option<PathBuf>,
    project_dir: PathBuf,
}

impl SubagentCatalog {
    /// Catalog for the conventional directories of a project
    pub fn new(project_root: &Path) -> Self {
        Self {
            user_dir: dirs::home_dir().map(|h| h.join(".claude").join("agents")),
            project_dir: project_root.join(".claude").join("agents"),
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

    /// List subagents, optionally restricted to one scope
    pub fn list(&self, scope: Option<AssetScope>) -> ConfigResult<Vec<SubagentEntry>> {
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

            let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
                .collect();
            paths.sort();

            for path in paths {
                entries.push(read_entry(&path, candidate));
            }
        }

        Ok(entries)
    }

    /// Find a subagent by name (file stem). User scope checked first.
    pub fn find(&self, name: &str, scope: Option<AssetScope>) -> Option<SubagentEntry> {
        for candidate in AssetScope::search_order() {
            if scope.is_some() && scope != Some(candidate) {
                continue;
            }
            let Some(dir) = self.dir_for(candidate) else {
                continue;
            };
            let path = dir.join(format!("{name}.md"));
            if path.is_file() {
                return Some(read_entry(&path, candidate));
            }
        }
        None
    }

    /// Delete a subagent file. Requires confirmation.
    pub fn delete(
        &self,
        name: &str,
        scope: Option<AssetScope>,
        confirm: Confirmation,
    ) -> ConfigResult<SubagentEntry> {
        let entry = self
            .find(name, scope)
            .ok_or_else(|| ConfigError::NotFound(format!("subagent '{name}'")))?;
        confirm.require(&format!("delete subagent '{name}' ({} scope)", entry.scope))?;

        fs::remove_file(&entry.path)?;
        tracing::info!("Deleted subagent '{}' from {} scope", name, entry.scope);
        Ok(entry)
    }

    /// Move a subagent between scopes. Requires confirmation; refuses to
    /// overwrite an existing target.
    pub fn move_subagent(
        &self,
        name: &str,
        from: AssetScope,
        to: AssetScope,
        confirm: Confirmation,
    ) -> ConfigResult<SubagentEntry> {
        if from == to {
            return Err(ConfigError::other("source and target scope are the same"));
        }
        let entry = self
            .find(name, Some(from))
            .ok_or_else(|| ConfigError::NotFound(format!("subagent '{name}' in {from} scope")))?;
        confirm.require(&format!("move subagent '{name}' from {from} to {to} scope"))?;

        let dir = self
            .dir_for(to)
            .ok_or_else(|| ConfigError::other(format!("no {to} agents directory available")))?;
        let target = dir.join(format!("{name}.md"));
        if target.exists() {
            return Err(ConfigError::AlreadyExists(format!(
                "subagent '{name}' in {to} scope"
            )));
        }

        fs::create_dir_all(dir)?;
        if fs::rename(&entry.path, &target).is_err() {
            fs::copy(&entry.path, &target)?;
            fs::remove_file(&entry.path)?;
        }
        tracing::info!("Moved subagent '{}' from {} to {} scope", name, from, to);
        Ok(read_entry(&target, to))
    }
}

fn read_entry(path: &Path, scope: AssetScope) -> SubagentEntry {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let frontmatter = fs::read_to_string(path)
        .ok()
        .and_then(|content| Frontmatter::parse(&content).map(|(fm, _)| fm))
        .unwrap_or_default();

    SubagentEntry {
        name: frontmatter.name().unwrap_or(&stem).to_string(),
        file_name,
        scope,
        path: path.to_path_buf(),
        description: frontmatter.description().unwrap_or("").to_string(),
    }
}
