//! Core types shared across the engine

pub mod error;

pub use error::{ConfigError, ConfigResult};

/// Explicit confirmation token for destructive operations.
///
/// Deleting or moving skills, subagents, and MCP server entries mutates
/// files on disk. Callers must pass `Confirmation::Confirmed` (normally
/// obtained by prompting the user) or the operation fails with
/// `ConfigError::ConfirmationRequired` before anything is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user explicitly approved the operation
    Confirmed,
    /// No approval was given
    Unconfirmed,
}

impl Confirmation {
    /// Whether the operation may proceed
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }

    /// Return an error naming the operation unless confirmed
    pub fn require(self, operation: &str) -> ConfigResult<()> {
        if self.is_confirmed() {
            Ok(())
        } else {
            Err(ConfigError::ConfirmationRequired(operation.to_string()))
        }
    }
}
