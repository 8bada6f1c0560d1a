//! Hook events, actions, and outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{ConfigError, ConfigResult};
use crate::permissions::InvocationContext;

/// Lifecycle events hooks can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// Before a tool executes — exit code 2 blocks the call
    PreToolUse,
    /// After a tool executes
    PostToolUse,
    /// When a permission prompt is about to be shown
    PermissionRequest,
    /// When the user submits a prompt
    UserPromptSubmit,
    /// When the agent emits a notification
    Notification,
    /// When a session starts
    SessionStart,
    /// When a session ends
    SessionEnd,
    /// Before conversation history is compacted
    PreCompact,
    /// When the main agent finishes responding
    Stop,
    /// When a subagent finishes responding
    SubagentStop,
}

impl HookEvent {
    /// Parse a wire-format event name. Unknown names yield `None`; the
    /// dispatcher treats them as "never matches" rather than an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(HookEvent::PreToolUse),
            "PostToolUse" => Some(HookEvent::PostToolUse),
            "PermissionRequest" => Some(HookEvent::PermissionRequest),
            "UserPromptSubmit" => Some(HookEvent::UserPromptSubmit),
            "Notification" => Some(HookEvent::Notification),
            "SessionStart" => Some(HookEvent::SessionStart),
            "SessionEnd" => Some(HookEvent::SessionEnd),
            "PreCompact" => Some(HookEvent::PreCompact),
            "Stop" => Some(HookEvent::Stop),
            "SubagentStop" => Some(HookEvent::SubagentStop),
            _ => None,
        }
    }

    /// Events where an exit-code-2 action blocks the underlying operation
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            HookEvent::PreToolUse
                | HookEvent::PermissionRequest
                | HookEvent::UserPromptSubmit
                | HookEvent::Stop
                | HookEvent::SubagentStop
        )
    }

    /// Events whose matchers are tested against a tool identifier.
    /// For other events the matcher is ignored and every group fires.
    pub fn is_tool_event(self) -> bool {
        matches!(
            self,
            HookEvent::PreToolUse | HookEvent::PostToolUse | HookEvent::PermissionRequest
        )
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HookEvent::PreToolUse => "PreToolUse",
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::PermissionRequest => "PermissionRequest",
            HookEvent::UserPromptSubmit => "UserPromptSubmit",
            HookEvent::Notification => "Notification",
            HookEvent::SessionStart => "SessionStart",
            HookEvent::SessionEnd => "SessionEnd",
            HookEvent::PreCompact => "PreCompact",
            HookEvent::Stop => "Stop",
            HookEvent::SubagentStop => "SubagentStop",
        };
        write!(f, "{name}")
    }
}

/// A configured hook action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HookActionConfig {
    /// Run an external command with the event payload on stdin
    #[serde(rename_all = "camelCase")]
    Command {
        /// Shell command line, run via `sh -c`
        command: String,
        /// Per-action timeout in seconds (default 60)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout: Option<u64>,
    },
    /// Inject prompt text without spawning anything
    Prompt {
        /// Text added to the event's context
        prompt: String,
    },
}

/// JSON payload delivered to command actions on stdin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookPayload {
    /// Wire name of the event
    pub hook_event_name: String,

    /// Tool name, for tool events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Structured tool arguments, for tool events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,

    /// The submitted prompt, for UserPromptSubmit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Working directory of the agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl HookPayload {
    /// Payload for a non-tool event
    pub fn for_event(event: HookEvent) -> Self {
        Self {
            hook_event_name: event.to_string(),
            ..Default::default()
        }
    }

    /// Payload for a tool event
    pub fn for_tool(event: HookEvent, ctx: &InvocationContext) -> Self {
        Self {
            hook_event_name: event.to_string(),
            tool_name: Some(ctx.tool_name.clone()),
            tool_input: Some(ctx.tool_input.clone()),
            ..Default::default()
        }
    }

    /// Payload for a prompt submission
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            hook_event_name: HookEvent::UserPromptSubmit.to_string(),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// Attach the working directory
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Aggregate result of running an event's action list
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// All actions completed; any stdout/prompt context they produced
    Continue {
        /// Context strings in action order
        added_context: Vec<String>,
    },
    /// A blocking action rejected the operation; remaining actions were
    /// not run
    Blocked {
        /// The action's stderr (or timeout description)
        reason: String,
    },
}

impl HookOutcome {
    /// An empty continue outcome
    pub fn ok() -> Self {
        HookOutcome::Continue {
            added_context: Vec::new(),
        }
    }

    /// Whether the operation may proceed
    pub fn is_continue(&self) -> bool {
        matches!(self, HookOutcome::Continue { .. })
    }

    /// Convert to a result for callers that treat a block as an error,
    /// yielding the collected context on continue
    pub fn into_result(self) -> ConfigResult<Vec<String>> {
        match self {
            HookOutcome::Continue { added_context } => Ok(added_context),
            HookOutcome::Blocked { reason } => Err(ConfigError::HookBlocked { reason }),
        }
    }
}
