//! Tool-identifier matching for hook groups

use regex::Regex;

/// Matches hook groups against tool names.
///
/// Pattern examples:
/// - `"Bash"` — match only the Bash tool
/// - `"Read|Write|Edit"` — match file tools
/// - `"^mcp__"` — match all MCP tools
///
/// No pattern (or an empty one) matches every tool. An invalid regex is
/// logged and never matches; a broken matcher must not take evaluation
/// down with it.
#[derive(Debug, Clone)]
pub struct HookMatcher {
    pattern: Option<Result<Regex, ()>>,
}

impl HookMatcher {
    /// Build a matcher from the configured pattern string
    pub fn compile(source: Option<&str>) -> Self {
        let pattern = match source {
            None => None,
            Some(s) if s.trim().is_empty() => None,
            Some(s) => match Regex::new(s) {
                Ok(regex) => Some(Ok(regex)),
                Err(e) => {
                    tracing::warn!("Invalid hook matcher '{}': {} (will never match)", s, e);
                    Some(Err(()))
                }
            },
        };
        Self { pattern }
    }

    /// A matcher that applies to every tool
    pub fn match_all() -> Self {
        Self { pattern: None }
    }

    /// Check if this matcher applies to a tool name
    pub fn matches(&self, tool_name: &str) -> bool {
        match &self.pattern {
            None => true,
            Some(Ok(regex)) => regex.is_match(tool_name),
            Some(Err(())) => false,
        }
    }
}
