//! Permission rules and pattern matching

use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{ConfigError, ConfigResult};
use crate::settings::SettingsScope;

/// Outcome class of a permission rule or resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Execute without prompting
    Allow,
    /// Prompt the user before executing
    Ask,
    /// Block outright
    Deny,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposition::Allow => write!(f, "allow"),
            Disposition::Ask => write!(f, "ask"),
            Disposition::Deny => write!(f, "deny"),
        }
    }
}

/// Parsed form of a rule pattern string.
///
/// Pattern syntax:
/// - `WebFetch` — bare tool name, matches any invocation of that tool
/// - `Bash(*)` — same as bare
/// - `Bash(git:*)` — commands starting with `git`
/// - `Bash(ls)` — exactly the command `ls`
/// - `Read(src/**)` — glob over the invocation's primary argument
///   (file path for Read/Write/Edit, URL for WebFetch, and so on)
#[derive(Debug, Clone, PartialEq)]
pub enum RulePattern {
    /// Match every invocation of the tool
    Tool { tool: String },
    /// Match a Bash command exactly (after trimming leading whitespace)
    CommandExact { tool: String, command: String },
    /// Match Bash commands starting with a prefix
    CommandPrefix { tool: String, prefix: String },
    /// Match the primary string argument against a glob
    ArgGlob { tool: String, pattern: Pattern },
}

impl RulePattern {
    /// Parse a pattern string
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::invalid_pattern(raw, "empty pattern"));
        }

        let Some(open) = raw.find('(') else {
            if raw.contains(')') {
                return Err(ConfigError::invalid_pattern(raw, "unbalanced parenthesis"));
            }
            return Ok(RulePattern::Tool {
                tool: raw.to_string(),
            });
        };

        if !raw.ends_with(')') {
            return Err(ConfigError::invalid_pattern(raw, "unbalanced parenthesis"));
        }
        let tool = raw[..open].trim();
        if tool.is_empty() {
            return Err(ConfigError::invalid_pattern(raw, "missing tool name"));
        }
        let inner = &raw[open + 1..raw.len() - 1];

        if inner == "*" || inner.is_empty() {
            return Ok(RulePattern::Tool {
                tool: tool.to_string(),
            });
        }

        if tool == "Bash" {
            if let Some(prefix) = inner.strip_suffix(":*") {
                return Ok(RulePattern::CommandPrefix {
                    tool: tool.to_string(),
                    prefix: prefix.to_string(),
                });
            }
            return Ok(RulePattern::CommandExact {
                tool: tool.to_string(),
                command: inner.to_string(),
            });
        }

        let pattern = Pattern::new(inner)
            .map_err(|e| ConfigError::invalid_pattern(raw, e.to_string()))?;
        Ok(RulePattern::ArgGlob {
            tool: tool.to_string(),
            pattern,
        })
    }

    /// The tool name this pattern is scoped to
    pub fn tool(&self) -> &str {
        match self {
            RulePattern::Tool { tool }
            | RulePattern::CommandExact { tool, .. }
            | RulePattern::CommandPrefix { tool, .. }
            | RulePattern::ArgGlob { tool, .. } => tool,
        }
    }

    /// Check whether this pattern matches an invocation
    pub fn matches(&self, ctx: &InvocationContext) -> bool {
        if self.tool() != ctx.tool_name {
            return false;
        }

        match self {
            RulePattern::Tool { .. } => true,
            RulePattern::CommandExact { command, .. } => {
                ctx.command().map(|c| c.trim_start() == command).unwrap_or(false)
            }
            RulePattern::CommandPrefix { prefix, .. } => ctx
                .command()
                .map(|c| c.trim_start().starts_with(prefix))
                .unwrap_or(false),
            RulePattern::ArgGlob { pattern, .. } => ctx
                .primary_arg()
                .map(|arg| pattern.matches(arg))
                .unwrap_or(false),
        }
    }
}

/// A pattern bound to a disposition and the scope that declared it
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionRule {
    /// Original pattern string from the settings file
    pub raw: String,
    /// Parsed pattern
    pub pattern: RulePattern,
    /// Outcome when the pattern matches
    pub disposition: Disposition,
    /// Scope that declared the rule
    pub scope: SettingsScope,
}

impl PermissionRule {
    /// Parse a rule from its settings-file string form
    pub fn parse(raw: &str, disposition: Disposition, scope: SettingsScope) -> ConfigResult<Self> {
        Ok(Self {
            raw: raw.to_string(),
            pattern: RulePattern::parse(raw)?,
            disposition,
            scope,
        })
    }

    /// Check whether this rule applies to an invocation
    pub fn matches(&self, ctx: &InvocationContext) -> bool {
        self.pattern.matches(ctx)
    }
}

/// The tool call being evaluated: name plus structured arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Tool name, e.g. `Bash` or `Read`
    pub tool_name: String,
    /// Structured tool arguments
    #[serde(default)]
    pub tool_input: Value,
}

impl InvocationContext {
    /// Create a context from a tool name and arguments
    pub fn new(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input,
        }
    }

    /// Shorthand for a Bash invocation
    pub fn bash(command: impl Into<String>) -> Self {
        Self::new("Bash", serde_json::json!({ "command": command.into() }))
    }

    /// The `command` argument, if present
    pub fn command(&self) -> Option<&str> {
        self.tool_input.get("command").and_then(|v| v.as_str())
    }

    /// The `file_path` argument, if present
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path").and_then(|v| v.as_str())
    }

    /// The argument glob patterns are matched against: the first of
    /// `command`, `file_path`, `path`, `url` that is present.
    pub fn primary_arg(&self) -> Option<&str> {
        ["command", "file_path", "path", "url"]
            .iter()
            .find_map(|key| self.tool_input.get(key).and_then(|v| v.as_str()))
    }
}
