pub mod core;
pub mod settings;
pub mod permissions;
pub mod hooks;

// Skill/subagent catalogs and MCP server entries managed through the
// same settings machinery
pub mod skills;
pub mod mcp;
