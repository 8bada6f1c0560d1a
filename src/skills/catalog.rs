//! Skill and subagent catalogs
//!
//! Skills are directories containing a `SKILL.md`; subagents are single
//! Markdown files. Both live under a user scope (`~/.claude/...`) and a
//! project scope (`./.claude/...`). Listing is sorted by directory
//! entry; unscoped lookups check user before project. Destructive
//! operations require explicit confirmation and fail before touching
//! anything without it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ConfigError, ConfigResult, Confirmation};

use super::frontmatter::Frontmatter;

/// The file every skill directory must contain
const SKILL_FILE: &str = "SKILL.md";

/// Where a skill or subagent lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetScope {
    /// `~/.claude/...`, shared across projects
    User,
    /// `./.claude/...`, this project only
    Project,
}

impl AssetScope {
    /// Unscoped lookup order: user first, then project
    pub fn search_order() -> [AssetScope; 2] {
        [AssetScope::User, AssetScope::Project]
    }
}

impl std::fmt::Display for AssetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetScope::User => write!(f, "user"),
            AssetScope::Project => write!(f, "project"),
        }
    }
}

/// One skill as listed
#[derive(Debug, Clone, PartialEq)]
pub struct SkillEntry {
    /// Name from frontmatter, falling back to the directory name
    pub name: String,
    /// Directory name on disk
    pub directory: String,
    /// Scope the skill was found in
    pub scope: AssetScope,
    /// Full path to the skill directory
    pub path: PathBuf,
    /// Description from frontmatter (empty if absent)
    pub description: String,
}

/// Full detail for one skill
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDetails {
    /// The listing entry
    pub entry: SkillEntry,
    /// Frontmatter fields
    pub frontmatter: Frontmatter,
    /// Markdown body after the frontmatter
    pub body: String,
    /// Files in the skill directory, relative paths, sorted
    pub files: Vec<String>,
}

/// Catalog over the user and project skill directories
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    user_dir: Option<PathBuf>,
    project_dir: PathBuf,
}

impl SkillCatalog {
    /// Catalog for the conventional directories of a project
    pub fn new(project_root: &Path) -> Self {
        Self {
            user_dir: dirs::home_dir().map(|h| h.join(".claude").join("skills")),
            project_dir: project_root.join(".claude").join("skills"),
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

    /// List skills, optionally restricted to one scope. Sorted by
    /// directory name within each scope; a missing directory is empty.
    pub fn list(&self, scope: Option<AssetScope>) -> ConfigResult<Vec<SkillEntry>> {
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
                if !path.is_dir() || !path.join(SKILL_FILE).exists() {
                    continue;
                }
                entries.push(read_entry(&path, candidate));
            }
        }

        Ok(entries)
    }

    /// Find a skill by directory name. Unscoped lookups check the user
    /// scope before the project scope.
    pub fn find(&self, name: &str, scope: Option<AssetScope>) -> Option<SkillEntry> {
        for candidate in AssetScope::search_order() {
            if scope.is_some() && scope != Some(candidate) {
                continue;
            }
            let Some(dir) = self.dir_for(candidate) else {
                continue;
            };
            let path = dir.join(name);
            if path.join(SKILL_FILE).exists() {
                return Some(read_entry(&path, candidate));
            }
        }
        None
    }

    /// Full details for a skill: frontmatter, body, and file inventory
    pub fn show(&self, name: &str, scope: Option<AssetScope>) -> ConfigResult<SkillDetails> {
        let entry = self
            .find(name, scope)
            .ok_or_else(|| ConfigError::NotFound(format!("skill '{name}'")))?;

        let content = fs::read_to_string(entry.path.join(SKILL_FILE))?;
        let (frontmatter, body) = Frontmatter::parse(&content)
            .unwrap_or_else(|| (Frontmatter::default(), content.clone()));

        let mut files = Vec::new();
        collect_files(&entry.path, &entry.path, &mut files)?;
        files.sort();

        Ok(SkillDetails {
            entry,
            frontmatter,
            body,
            files,
        })
    }

    /// Delete a skill directory. Requires confirmation.
    pub fn delete(
        &self,
        name: &str,
        scope: Option<AssetScope>,
        confirm: Confirmation,
    ) -> ConfigResult<SkillEntry> {
        let entry = self
            .find(name, scope)
            .ok_or_else(|| ConfigError::NotFound(format!("skill '{name}'")))?;
        confirm.require(&format!("delete skill '{name}' ({} scope)", entry.scope))?;

        fs::remove_dir_all(&entry.path)?;
        tracing::info!("Deleted skill '{}' from {} scope", name, entry.scope);
        Ok(entry)
    }

    /// Move a skill between scopes. Requires confirmation (the source is
    /// removed). Refuses to overwrite an existing target.
    pub fn move_skill(
        &self,
        name: &str,
        from: AssetScope,
        to: AssetScope,
        confirm: Confirmation,
    ) -> ConfigResult<SkillEntry> {
        if from == to {
            return Err(ConfigError::other("source and target scope are the same"));
        }
        let entry = self
            .find(name, Some(from))
            .ok_or_else(|| ConfigError::NotFound(format!("skill '{name}' in {from} scope")))?;
        confirm.require(&format!("move skill '{name}' from {from} to {to} scope"))?;

        let target = self.target_path(name, to)?;
        move_dir(&entry.path, &target)?;
        tracing::info!("Moved skill '{}' from {} to {} scope", name, from, to);
        Ok(read_entry(&target, to))
    }

    /// Copy a skill between scopes. Non-destructive, so no confirmation,
    /// but refuses to overwrite an existing target.
    pub fn copy_skill(&self, name: &str, from: AssetScope, to: AssetScope) -> ConfigResult<SkillEntry> {
        if from == to {
            return Err(ConfigError::other("source and target scope are the same"));
        }
        let entry = self
            .find(name, Some(from))
            .ok_or_else(|| ConfigError::NotFound(format!("skill '{name}' in {from} scope")))?;

        let target = self.target_path(name, to)?;
        copy_dir(&entry.path, &target)?;
        tracing::info!("Copied skill '{}' from {} to {} scope", name, from, to);
        Ok(read_entry(&target, to))
    }

    fn target_path(&self, name: &str, to: AssetScope) -> ConfigResult<PathBuf> {
        let dir = self
            .dir_for(to)
            .ok_or_else(|| ConfigError::other(format!("no {to} skills directory available")))?;
        let target = dir.join(name);
        if target.exists() {
            return Err(ConfigError::AlreadyExists(format!(
                "skill '{name}' in {to} scope"
            )));
        }
        Ok(target)
    }
}

fn read_entry(path: &Path, scope: AssetScope) -> SkillEntry {
    let directory = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let frontmatter = fs::read_to_string(path.join(SKILL_FILE))
        .ok()
        .and_then(|content| Frontmatter::parse(&content).map(|(fm, _)| fm))
        .unwrap_or_default();

    SkillEntry {
        name: frontmatter.name().unwrap_or(&directory).to_string(),
        directory,
        scope,
        path: path.to_path_buf(),
        description: frontmatter.description().unwrap_or("").to_string(),
    }
}

pub(super) fn sorted_entries(dir: &Path) -> ConfigResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    Ok(paths)
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> ConfigResult<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> ConfigResult<()> {
    fs::create_dir_all(to)?;
    for path in sorted_entries(from)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = to.join(name);
        if path.is_dir() {
            copy_dir(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }
    Ok(())
}

/// Rename when possible, copy-then-remove across filesystems
fn move_dir(from: &Path, to: &Path) -> ConfigResult<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::rename(from, to).is_err() {
        copy_dir(from, to)?;
        fs::remove_dir_all(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_catalog() -> (SkillCatalog, TempDir) {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user-skills");
        let project = temp.path().join("project-skills");
        fs::create_dir_all(&user).unwrap();
        fs::create_dir_all(&project).unwrap();
        (SkillCatalog::with_dirs(user, project), temp)
    }

    fn write_skill(catalog: &SkillCatalog, scope: AssetScope, dir: &str, name: &str, desc: &str) {
        let base = catalog.dir_for(scope).unwrap().join(dir);
        fs::create_dir_all(&base).unwrap();
        fs::write(
            base.join(SKILL_FILE),
            format!("---\nname: {name}\ndescription: {desc}\n---\n\n# {name}\nInstructions.\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_list_sorted_and_scope_tagged() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::User, "zeta", "zeta", "last");
        write_skill(&catalog, AssetScope::User, "alpha", "alpha", "first");
        write_skill(&catalog, AssetScope::Project, "beta", "beta", "project one");

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

        let project_only = catalog.list(Some(AssetScope::Project)).unwrap();
        assert_eq!(project_only.len(), 1);
        assert_eq!(project_only[0].description, "project one");
    }

    #[test]
    fn test_directory_without_skill_file_ignored() {
        let (catalog, _temp) = create_test_catalog();
        fs::create_dir_all(catalog.dir_for(AssetScope::User).unwrap().join("not-a-skill")).unwrap();

        assert!(catalog.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_find_checks_user_before_project() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::User, "dup", "dup", "user copy");
        write_skill(&catalog, AssetScope::Project, "dup", "dup", "project copy");

        let found = catalog.find("dup", None).unwrap();
        assert_eq!(found.scope, AssetScope::User);

        let found = catalog.find("dup", Some(AssetScope::Project)).unwrap();
        assert_eq!(found.description, "project copy");
    }

    #[test]
    fn test_show_returns_body_and_files() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::Project, "helper", "helper", "a helper");
        let scripts = catalog
            .dir_for(AssetScope::Project)
            .unwrap()
            .join("helper")
            .join("scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join("run.sh"), "#!/bin/sh\n").unwrap();

        let details = catalog.show("helper", None).unwrap();
        assert!(details.body.contains("Instructions."));
        assert_eq!(details.frontmatter.name(), Some("helper"));
        assert_eq!(details.files, vec!["SKILL.md", "scripts/run.sh"]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::User, "doomed", "doomed", "");

        let err = catalog
            .delete("doomed", None, Confirmation::Unconfirmed)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ConfirmationRequired(_)));
        // Nothing was touched
        assert!(catalog.find("doomed", None).is_some());

        catalog.delete("doomed", None, Confirmation::Confirmed).unwrap();
        assert!(catalog.find("doomed", None).is_none());
    }

    #[test]
    fn test_move_between_scopes() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::Project, "mover", "mover", "moves");

        let moved = catalog
            .move_skill("mover", AssetScope::Project, AssetScope::User, Confirmation::Confirmed)
            .unwrap();
        assert_eq!(moved.scope, AssetScope::User);
        assert!(catalog.find("mover", Some(AssetScope::Project)).is_none());
        assert_eq!(
            catalog.find("mover", Some(AssetScope::User)).unwrap().description,
            "moves"
        );
    }

    #[test]
    fn test_move_refuses_overwrite() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::Project, "dup", "dup", "project");
        write_skill(&catalog, AssetScope::User, "dup", "dup", "user");

        let err = catalog
            .move_skill("dup", AssetScope::Project, AssetScope::User, Confirmation::Confirmed)
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }

    #[test]
    fn test_copy_keeps_source() {
        let (catalog, _temp) = create_test_catalog();
        write_skill(&catalog, AssetScope::User, "shared", "shared", "useful");

        catalog
            .copy_skill("shared", AssetScope::User, AssetScope::Project)
            .unwrap();
        assert!(catalog.find("shared", Some(AssetScope::User)).is_some());
        assert!(catalog.find("shared", Some(AssetScope::Project)).is_some());
    }

    #[test]
    fn test_missing_skill_is_not_found() {
        let (catalog, _temp) = create_test_catalog();
        let err = catalog.show("ghost", None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
