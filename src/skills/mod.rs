//! Skill, subagent, and plugin management
//!
//! Skills are directories containing a frontmattered `SKILL.md` plus any
//! supporting files; subagents are single frontmattered Markdown files;
//! plugins are directories with a `.claude-plugin/plugin.json` manifest.
//! All exist at user scope (`~/.claude/skills`, `~/.claude/agents`,
//! `~/.claude/plugins`) and project scope (the same names under
//! `./.claude/`).
//!
//! Catalogs list, look up, and show assets; delete, move, and remove
//! require an explicit [`Confirmation`](crate::core::Confirmation) token
//! and fail before touching the filesystem without one.

mod catalog;
mod frontmatter;
mod plugins;
mod subagents;

pub use catalog::{AssetScope, SkillCatalog, SkillDetails, SkillEntry};
pub use frontmatter::Frontmatter;
pub use plugins::{PluginCatalog, PluginEntry, PluginManifest};
pub use subagents::{SubagentCatalog, SubagentEntry};
