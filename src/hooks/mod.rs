//! Hook matching and dispatch
//!
//! Hooks bind external commands (or inline prompt text) to lifecycle
//! events. Evaluating an event is a two-step pipeline:
//!
//! 1. [`dispatch`] selects the actions whose matcher applies, walking
//!    scopes in precedence order and preserving declaration order —
//!    project hooks add to user hooks, both fire.
//! 2. [`HookExecutor::execute`] runs them sequentially: JSON payload on
//!    stdin, exit 0 continues (stdout becomes added context), exit 2 on
//!    a blocking event blocks and short-circuits, anything else is a
//!    logged non-fatal error. Timeouts are hard failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_policy_sdk::hooks::{dispatch, HookEvent, HookExecutor, HookPayload};
//! use agent_policy_sdk::permissions::InvocationContext;
//! use agent_policy_sdk::settings::ScopeSet;
//!
//! let scopes = ScopeSet::from_disk(project_root)?;
//! let ctx = InvocationContext::bash("git push");
//!
//! let actions = dispatch(HookEvent::PreToolUse, Some(&ctx), &scopes);
//! let payload = HookPayload::for_tool(HookEvent::PreToolUse, &ctx);
//! let outcome = HookExecutor::new().execute(&actions, &payload).await;
//! if !outcome.is_continue() {
//!     // surface the blocking reason instead of running the tool
//! }
//! ```

mod dispatcher;
mod executor;
mod matcher;
mod types;

pub use dispatcher::{dispatch, BoundAction};
pub use executor::{ActionRunner, CommandRunner, HookExecutor, RunResult, DEFAULT_HOOK_TIMEOUT_SECS};
pub use matcher::HookMatcher;
pub use types::{HookActionConfig, HookEvent, HookOutcome, HookPayload};
