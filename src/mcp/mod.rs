//! MCP server configuration management
//!
//! Models the `mcpServers` settings section and the add/remove
//! operations over it. Removal is destructive and therefore
//! confirmation-gated; both operations go through the atomic
//! [`SettingsStore`] so a crash never leaves partial JSON.

mod config;

pub use config::McpServerConfig;

use crate::core::{ConfigError, ConfigResult, Confirmation};
use crate::settings::SettingsStore;

/// Add (or with `replace`, overwrite) a server entry in a settings file
pub fn add_server(
    store: &SettingsStore,
    name: &str,
    config: McpServerConfig,
    replace: bool,
) -> ConfigResult<()> {
    let existing = store.read()?.mcp_servers.contains_key(name);
    if existing && !replace {
        return Err(ConfigError::AlreadyExists(format!("MCP server '{name}'")));
    }

    store.update(|settings| {
        settings.mcp_servers.insert(name.to_string(), config);
    })?;
    tracing::info!("Added MCP server '{}' to {}", name, store.path().display());
    Ok(())
}

/// Remove a server entry. Requires confirmation.
pub fn remove_server(store: &SettingsStore, name: &str, confirm: Confirmation) -> ConfigResult<()> {
    if !store.read()?.mcp_servers.contains_key(name) {
        return Err(ConfigError::NotFound(format!("MCP server '{name}'")));
    }
    confirm.require(&format!("remove MCP server '{name}'"))?;

    store.update(|settings| {
        settings.mcp_servers.remove(name);
    })?;
    tracing::info!("Removed MCP server '{}' from {}", name, store.path().display());
    Ok(())
}
