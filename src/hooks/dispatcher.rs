//! Hook dispatch: which actions fire for an event, and in what order
//!
//! Every scope contributes — project hooks add to user hooks, neither
//! suppresses the other. Scopes are visited in precedence order and
//! groups/actions keep their declaration order within a scope, so the
//! resulting action list is deterministic for a given scope set.

use crate::permissions::InvocationContext;
use crate::settings::{ScopeSet, SettingsScope};

use super::matcher::HookMatcher;
use super::types::{HookActionConfig, HookEvent};

/// An action selected for execution, tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct BoundAction {
    /// Scope whose settings declared the action
    pub scope: SettingsScope,
    /// Event the action is bound to
    pub event: HookEvent,
    /// The configured action
    pub action: HookActionConfig,
}

/// Collect the ordered action list for an event.
///
/// For tool events the context's tool name is tested against each
/// group's matcher; for other events every group fires. Event names in
/// settings files that don't parse to a known `HookEvent` are skipped.
pub fn dispatch(
    event: HookEvent,
    ctx: Option<&InvocationContext>,
    scopes: &ScopeSet,
) -> Vec<BoundAction> {
    let mut actions = Vec::new();

    for (scope, settings) in scopes.layers() {
        for (name, groups) in &settings.hooks {
            if HookEvent::from_name(name) != Some(event) {
                continue;
            }

            for group in groups {
                let matcher = HookMatcher::compile(group.matcher.as_deref());
                let applies = if event.is_tool_event() {
                    match ctx {
                        Some(ctx) => matcher.matches(&ctx.tool_name),
                        None => false,
                    }
                } else {
                    true
                };
                if !applies {
                    continue;
                }

                for action in &group.hooks {
                    actions.push(BoundAction {
                        scope,
                        event,
                        action: action.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!("{} hook action(s) bound for {}", actions.len(), event);
    actions
}
