//! Settings files, scopes, and the merged evaluation view
//!
//! Configuration lives in JSON files, one per scope:
//!
//! | Scope | File |
//! |-------|------|
//! | `managed` | system managed-settings.json |
//! | `cli-flag` | (in-process only) |
//! | `local` | `.claude/settings.local.json` |
//! | `project` | `.claude/settings.json` |
//! | `user` | `~/.claude/settings.json` |
//!
//! Files are read fresh at evaluation time and written back whole, via an
//! atomic rename, so concurrent readers never observe partial JSON.
//! String values in `env` and `mcpServers` sections support `${VAR}` and
//! `${VAR:-default}` substitution at resolve time.

mod env_subst;
mod loader;
mod model;
mod scope;
mod store;

pub use env_subst::{expand, expand_with};
pub use loader::{load_settings, ScopeSet};
pub use model::{AttributionSettings, HookGroup, PermissionSettings, Settings};
pub use scope::SettingsScope;
pub use store::SettingsStore;
