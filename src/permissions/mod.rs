//! Permission rule resolution
//!
//! Decides, for a given tool invocation, whether the call is allowed,
//! requires asking the user, or is denied — from pattern rules declared
//! across precedence-ordered scopes (managed > cli-flag > local >
//! project > user).
//!
//! ## Example
//!
//! ```rust,ignore
//! use agent_policy_sdk::permissions::{resolve, Disposition, InvocationContext};
//! use agent_policy_sdk::settings::ScopeSet;
//!
//! let scopes = ScopeSet::from_disk(std::env::current_dir()?.as_path())?;
//! let ctx = InvocationContext::bash("git status");
//!
//! match resolve(&ctx, &scopes)?.disposition {
//!     Disposition::Allow => { /* execute */ }
//!     Disposition::Ask => { /* prompt the user */ }
//!     Disposition::Deny => { /* reject */ }
//! }
//! ```

mod resolver;
mod rule;

pub use resolver::{resolve, Resolution};
pub use rule::{Disposition, InvocationContext, PermissionRule, RulePattern};
