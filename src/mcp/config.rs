//! MCP server configuration entries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::settings::expand_with;

/// Configuration for a single MCP server under the `mcpServers` key.
///
/// The two transport shapes are distinguished by their required field:
/// stdio entries carry `command`, HTTP entries carry `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum McpServerConfig {
    /// A server spawned as a child process speaking over stdio
    Stdio {
        /// Executable to spawn
        command: String,
        /// Arguments passed to the executable
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        /// Environment for the child process
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
    /// A server reached over HTTP
    Http {
        /// Server URL
        url: String,
        /// Request headers
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

impl McpServerConfig {
    /// Create a stdio entry
    pub fn stdio(command: impl Into<String>) -> Self {
        McpServerConfig::Stdio {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Create an HTTP entry
    pub fn http(url: impl Into<String>) -> Self {
        McpServerConfig::Http {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Resolve `${VAR}` references in every string field using the given
    /// lookup. The stored form keeps the references; resolution happens
    /// when the entry is about to be used.
    pub fn resolved_with<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Copy,
    {
        match self {
            McpServerConfig::Stdio { command, args, env } => McpServerConfig::Stdio {
                command: expand_with(command, lookup),
                args: args.iter().map(|a| expand_with(a, lookup)).collect(),
                env: env
                    .iter()
                    .map(|(k, v)| (k.clone(), expand_with(v, lookup)))
                    .collect(),
            },
            McpServerConfig::Http { url, headers } => McpServerConfig::Http {
                url: expand_with(url, lookup),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.clone(), expand_with(v, lookup)))
                    .collect(),
            },
        }
    }

    /// Resolve `${VAR}` references against the process environment
    pub fn resolved(&self) -> Self {
        self.resolved_with(|name| std::env::var(name).ok())
    }
}
