//! Hook action execution
//!
//! Actions for an event run sequentially in their dispatched order.
//! Command actions are spawned as `sh -c <command>` with the JSON event
//! payload on stdin. Exit-code contract:
//!
//! | Exit | Blocking event | Non-blocking event |
//! |------|----------------|--------------------|
//! | 0 | continue, stdout becomes added context | same |
//! | 2 | block, stderr surfaced, remaining actions skipped | logged, continue |
//! | other | logged, continue | logged, continue |
//!
//! A timeout is a hard failure: it blocks on blocking events and is
//! logged otherwise.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::settings::expand;

use super::dispatcher::BoundAction;
use super::types::{HookActionConfig, HookOutcome, HookPayload};

/// Default per-action timeout in seconds
pub const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 60;

/// Raw result of running one action, before exit-code policy is applied
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// A process ran to completion
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process exceeded its timeout
    TimedOut { timeout_secs: u64 },
    /// The process could not be started
    SpawnFailed { detail: String },
    /// An inline (prompt) action produced text without a process
    Inline { text: String },
}

/// Seam for running a single action. The default implementation spawns
/// real processes; tests substitute a scripted runner.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// Run one action and report what happened
    async fn run(&self, action: &BoundAction, payload: &HookPayload) -> RunResult;
}

/// Spawns command actions via `sh -c` in a working directory
pub struct CommandRunner {
    working_dir: PathBuf,
}

impl CommandRunner {
    /// Create a runner executing in the given directory
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    async fn run_command(&self, command: &str, timeout_secs: u64, payload: &HookPayload) -> RunResult {
        tracing::debug!("Running hook command: {}", command);

        // Config-level ${VAR} references resolve before the shell sees
        // the line, so they survive single quotes and get the
        // unset-expands-to-empty semantics of the settings files.
        let command = expand(command);

        let spawned = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return RunResult::SpawnFailed {
                    detail: e.to_string(),
                }
            }
        };

        // Deliver the event payload on stdin; a hook that exits without
        // reading it is fine, so a broken pipe here is not an error. The
        // write shares the deadline with the wait: a payload larger than
        // the pipe buffer must not stall a hook that never reads stdin
        // past its timeout.
        let stdin = child.stdin.take();
        let bytes = serde_json::to_vec(payload).unwrap_or_default();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                let _ = stdin.write_all(&bytes).await;
            }
        };

        let duration = Duration::from_secs(timeout_secs);
        let waited = timeout(duration, async {
            let (_, output) = tokio::join!(feed, child.wait_with_output());
            output
        })
        .await;

        match waited {
            Ok(Ok(output)) => RunResult::Completed {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Ok(Err(e)) => RunResult::SpawnFailed {
                detail: e.to_string(),
            },
            Err(_) => RunResult::TimedOut { timeout_secs },
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl ActionRunner for CommandRunner {
    async fn run(&self, action: &BoundAction, payload: &HookPayload) -> RunResult {
        match &action.action {
            HookActionConfig::Command { command, timeout } => {
                let timeout_secs = timeout.unwrap_or(DEFAULT_HOOK_TIMEOUT_SECS);
                // Hooks see the directory they run in
                let payload = if payload.cwd.is_some() {
                    payload.clone()
                } else {
                    payload.clone().with_cwd(self.working_dir.to_string_lossy())
                };
                self.run_command(command, timeout_secs, &payload).await
            }
            HookActionConfig::Prompt { prompt } => RunResult::Inline {
                text: prompt.clone(),
            },
        }
    }
}

/// Runs an event's action list and folds the results into one outcome
pub struct HookExecutor {
    runner: Box<dyn ActionRunner>,
}

impl HookExecutor {
    /// Executor spawning commands in the current directory
    pub fn new() -> Self {
        Self::with_runner(Box::new(CommandRunner::default()))
    }

    /// Executor spawning commands in a specific directory
    pub fn with_working_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_runner(Box::new(CommandRunner::new(dir)))
    }

    /// Executor with a custom runner (used by tests)
    pub fn with_runner(runner: Box<dyn ActionRunner>) -> Self {
        Self { runner }
    }

    /// Run actions sequentially. A block short-circuits the rest.
    pub async fn execute(&self, actions: &[BoundAction], payload: &HookPayload) -> HookOutcome {
        let mut added_context = Vec::new();

        for action in actions {
            let result = self.runner.run(action, payload).await;
            let blocking = action.event.is_blocking();

            match result {
                RunResult::Inline { text } => {
                    added_context.push(text);
                }
                RunResult::Completed {
                    exit_code: 0,
                    stdout,
                    ..
                } => {
                    let trimmed = stdout.trim();
                    if !trimmed.is_empty() {
                        added_context.push(trimmed.to_string());
                    }
                }
                RunResult::Completed {
                    exit_code: 2,
                    stdout,
                    stderr,
                } => {
                    if blocking {
                        let reason = if stderr.trim().is_empty() {
                            stdout.trim().to_string()
                        } else {
                            stderr.trim().to_string()
                        };
                        tracing::info!("{} hook blocked: {}", action.event, reason);
                        return HookOutcome::Blocked { reason };
                    }
                    tracing::warn!(
                        "{} hook exited 2 on non-blocking event (ignored): {}",
                        action.event,
                        stderr.trim()
                    );
                }
                RunResult::Completed {
                    exit_code, stderr, ..
                } => {
                    tracing::warn!(
                        "{} hook exited {} (non-fatal): {}",
                        action.event,
                        exit_code,
                        stderr.trim()
                    );
                }
                RunResult::TimedOut { timeout_secs } => {
                    let reason = format!("hook timed out after {timeout_secs}s");
                    if blocking {
                        tracing::error!("{} hook blocked: {}", action.event, reason);
                        return HookOutcome::Blocked { reason };
                    }
                    tracing::error!("{} hook: {} (non-fatal)", action.event, reason);
                }
                RunResult::SpawnFailed { detail } => {
                    tracing::warn!("{} hook failed to start (non-fatal): {}", action.event, detail);
                }
            }
        }

        HookOutcome::Continue { added_context }
    }
}

impl Default for HookExecutor {
    fn default() -> Self {
        Self::new()
    }
}
