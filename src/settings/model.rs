//! Settings file model
//!
//! The JSON settings document with its fixed top-level key set:
//! `permissions`, `hooks`, `mcpServers`, `env`, `model`, `sandbox`,
//! `attribution`. Empty sections are omitted on serialization so a
//! parse → serialize → parse round trip yields an equal document with a
//! stable key set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hooks::HookActionConfig;
use crate::mcp::McpServerConfig;
use crate::permissions::Disposition;

/// A single settings document (one scope, one file)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Permission rule lists
    #[serde(skip_serializing_if = "PermissionSettings::is_empty")]
    pub permissions: PermissionSettings,

    /// Hook bindings keyed by event name. Unknown event names are kept in
    /// the document but never dispatched.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub hooks: BTreeMap<String, Vec<HookGroup>>,

    /// MCP server entries keyed by server name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, McpServerConfig>,

    /// Environment variables injected into tool processes
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Model override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether tool execution is sandboxed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<bool>,

    /// Commit/PR attribution settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<AttributionSettings>,
}

impl Settings {
    /// Create an empty settings document
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every section is empty
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
            && self.hooks.is_empty()
            && self.mcp_servers.is_empty()
            && self.env.is_empty()
            && self.model.is_none()
            && self.sandbox.is_none()
            && self.attribution.is_none()
    }
}

/// The `permissions` section: rule pattern strings grouped by disposition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionSettings {
    /// Patterns that allow without asking
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,

    /// Patterns that always prompt the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ask: Vec<String>,

    /// Patterns that block outright
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,

    /// Disposition applied when no rule in any scope matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<Disposition>,
}

impl PermissionSettings {
    /// Whether no rules or default mode are set
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty()
            && self.ask.is_empty()
            && self.deny.is_empty()
            && self.default_mode.is_none()
    }
}

/// One entry in an event's hook list: a matcher plus its actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookGroup {
    /// Pattern over tool identifiers; absent or empty matches every tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    /// Actions executed in declaration order when the matcher applies
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<HookActionConfig>,
}

/// The `attribution` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributionSettings {
    /// Include a co-authored-by trailer in commits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_authored_by: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_serialize_to_empty_object() {
        let json = serde_json::to_string(&Settings::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "permissions": {
                "allow": ["Bash(git:*)", "Read(src/**)"],
                "deny": ["Bash(rm:*)"],
                "defaultMode": "ask"
            },
            "hooks": {
                "PreToolUse": [
                    {
                        "matcher": "Bash",
                        "hooks": [
                            { "type": "command", "command": "validate.sh", "timeout": 10 }
                        ]
                    }
                ]
            },
            "env": { "FOO": "bar" },
            "model": "opus",
            "sandbox": true
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.permissions.allow.len(), 2);
        assert_eq!(settings.permissions.deny, vec!["Bash(rm:*)"]);
        assert_eq!(settings.permissions.default_mode, Some(Disposition::Ask));
        assert_eq!(settings.hooks["PreToolUse"].len(), 1);
        assert_eq!(settings.env["FOO"], "bar");
        assert_eq!(settings.model.as_deref(), Some("opus"));
        assert_eq!(settings.sandbox, Some(true));
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let json = r#"{
            "permissions": { "allow": ["Bash(git:*)"], "ask": ["WebFetch"] },
            "hooks": {
                "SessionStart": [
                    { "hooks": [ { "type": "prompt", "prompt": "Remember the house rules" } ] }
                ]
            },
            "mcpServers": {
                "docs": { "command": "docs-server", "args": ["--port", "0"] }
            },
            "env": { "A": "1" },
            "attribution": { "coAuthoredBy": false }
        }"#;

        let parsed: Settings = serde_json::from_str(json).unwrap();
        let serialized = serde_json::to_string_pretty(&parsed).unwrap();
        let reparsed: Settings = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, reparsed);

        // Key set is stable: nothing the original set goes missing
        let value: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(keys.contains(&"permissions"));
        assert!(keys.contains(&"hooks"));
        assert!(keys.contains(&"mcpServers"));
        assert!(keys.contains(&"env"));
        assert!(keys.contains(&"attribution"));
        // Empty sections stay omitted
        assert!(!keys.contains(&"model"));
        assert!(!keys.contains(&"sandbox"));
    }

    #[test]
    fn test_hook_group_without_matcher() {
        let json = r#"{ "hooks": [ { "type": "command", "command": "notify.sh" } ] }"#;
        let group: HookGroup = serde_json::from_str(json).unwrap();
        assert!(group.matcher.is_none());
        assert_eq!(group.hooks.len(), 1);
    }
}
