//! Configuration scopes and their precedence

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where managed (enterprise) settings live on this platform
#[cfg(target_os = "macos")]
const MANAGED_SETTINGS_PATH: &str = "/Library/Application Support/ClaudeCode/managed-settings.json";
#[cfg(not(target_os = "macos"))]
const MANAGED_SETTINGS_PATH: &str = "/etc/claude-code/managed-settings.json";

/// A configuration layer.
///
/// Scopes are ordered by decreasing precedence: `Managed` always wins,
/// `User` is consulted last. The derived `Ord` relies on declaration
/// order, so "smaller" means "higher precedence".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsScope {
    /// Enterprise-managed settings, not user-editable
    Managed,
    /// Settings injected via command-line flags for this process
    CliFlag,
    /// Project-local overrides (`.claude/settings.local.json`, not shared)
    Local,
    /// Project settings (`.claude/settings.json`, checked in)
    Project,
    /// User settings (`~/.claude/settings.json`)
    User,
}

impl SettingsScope {
    /// All scopes, highest precedence first
    pub fn precedence() -> [SettingsScope; 5] {
        [
            SettingsScope::Managed,
            SettingsScope::CliFlag,
            SettingsScope::Local,
            SettingsScope::Project,
            SettingsScope::User,
        ]
    }

    /// Whether settings at this scope may be written by the engine
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            SettingsScope::Local | SettingsScope::Project | SettingsScope::User
        )
    }

    /// Conventional settings file path for this scope.
    ///
    /// `CliFlag` has no backing file; `User` returns `None` when the home
    /// directory cannot be determined.
    pub fn settings_path(self, project_root: &Path) -> Option<PathBuf> {
        match self {
            SettingsScope::Managed => Some(PathBuf::from(MANAGED_SETTINGS_PATH)),
            SettingsScope::CliFlag => None,
            SettingsScope::Local => Some(project_root.join(".claude").join("settings.local.json")),
            SettingsScope::Project => Some(project_root.join(".claude").join("settings.json")),
            SettingsScope::User => dirs::home_dir().map(|h| h.join(".claude").join("settings.json")),
        }
    }
}

impl std::fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsScope::Managed => write!(f, "managed"),
            SettingsScope::CliFlag => write!(f, "cli-flag"),
            SettingsScope::Local => write!(f, "local"),
            SettingsScope::Project => write!(f, "project"),
            SettingsScope::User => write!(f, "user"),
        }
    }
}
