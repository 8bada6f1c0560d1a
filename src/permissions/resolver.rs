//! Scope-precedence permission resolution
//!
//! The resolver walks scopes from highest precedence (managed) to lowest
//! (user). The first scope containing at least one matching rule decides
//! the outcome; within that scope `deny` is checked before `ask` before
//! `allow`, declaration order inside each class. A `deny` in a higher
//! scope therefore can never be overridden below it. When nothing
//! matches anywhere, the highest-precedence `defaultMode` applies,
//! falling back to `ask`.
//!
//! Resolution is a pure function of the context and the scope set: the
//! same inputs always produce the same outcome.

use crate::core::ConfigResult;
use crate::settings::{PermissionSettings, ScopeSet, SettingsScope};

use super::rule::{Disposition, InvocationContext, PermissionRule};

/// Outcome of permission resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The single resulting disposition
    pub disposition: Disposition,
    /// The rule that decided, if any matched
    pub matched: Option<PermissionRule>,
}

impl Resolution {
    /// Scope of the deciding rule, if a rule matched
    pub fn scope(&self) -> Option<SettingsScope> {
        self.matched.as_ref().map(|r| r.scope)
    }
}

/// Parse one scope's rule lists, deny first, then ask, then allow
fn scope_rules(
    settings: &PermissionSettings,
    scope: SettingsScope,
) -> ConfigResult<Vec<PermissionRule>> {
    let classes = [
        (Disposition::Deny, &settings.deny),
        (Disposition::Ask, &settings.ask),
        (Disposition::Allow, &settings.allow),
    ];

    let mut rules = Vec::new();
    for (disposition, patterns) in classes {
        for raw in patterns {
            rules.push(PermissionRule::parse(raw, disposition, scope)?);
        }
    }
    Ok(rules)
}

/// Resolve an invocation against a merged scope set.
///
/// Returns `InvalidPattern` if any rule string in a consulted scope fails
/// to parse; permission configuration errors are never silently skipped.
pub fn resolve(ctx: &InvocationContext, scopes: &ScopeSet) -> ConfigResult<Resolution> {
    for (scope, settings) in scopes.layers() {
        let rules = scope_rules(&settings.permissions, scope)?;
        if let Some(rule) = rules.into_iter().find(|r| r.matches(ctx)) {
            tracing::debug!(
                "Permission for {} decided by {} rule '{}' at {} scope",
                ctx.tool_name,
                rule.disposition,
                rule.raw,
                scope
            );
            return Ok(Resolution {
                disposition: rule.disposition,
                matched: Some(rule),
            });
        }
    }

    // No rule matched: highest-precedence defaultMode wins, else ask
    let disposition = scopes
        .layers()
        .find_map(|(_, settings)| settings.permissions.default_mode)
        .unwrap_or(Disposition::Ask);

    tracing::debug!(
        "No permission rule matched {}; default disposition {}",
        ctx.tool_name,
        disposition
    );
    Ok(Resolution {
        disposition,
        matched: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn layer(
        allow: &[&str],
        ask: &[&str],
        deny: &[&str],
        default_mode: Option<Disposition>,
    ) -> Settings {
        Settings {
            permissions: PermissionSettings {
                allow: allow.iter().map(|s| s.to_string()).collect(),
                ask: ask.iter().map(|s| s.to_string()).collect(),
                deny: deny.iter().map(|s| s.to_string()).collect(),
                default_mode,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_first_matching_scope_wins() {
        // Project allows Bash(git:*), user asks for everything else
        let scopes = ScopeSet::new()
            .with_layer(
                SettingsScope::Project,
                layer(&["Bash(git:*)"], &[], &[], None),
            )
            .with_layer(SettingsScope::User, layer(&[], &["Bash(*)"], &[], None));

        let res = resolve(&InvocationContext::bash("git status"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Allow);
        assert_eq!(res.scope(), Some(SettingsScope::Project));
    }

    #[test]
    fn test_falls_through_to_lower_scope() {
        // No project match falls to the user-scope ask rule
        let scopes = ScopeSet::new()
            .with_layer(
                SettingsScope::Project,
                layer(&["Bash(git:*)"], &[], &[], None),
            )
            .with_layer(SettingsScope::User, layer(&[], &["Bash(*)"], &[], None));

        let res = resolve(&InvocationContext::bash("rm -rf /"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Ask);
        assert_eq!(res.scope(), Some(SettingsScope::User));
    }

    #[test]
    fn test_managed_deny_beats_lower_allow() {
        let scopes = ScopeSet::new()
            .with_layer(SettingsScope::Managed, layer(&[], &[], &["Bash(git:*)"], None))
            .with_layer(SettingsScope::Project, layer(&["Bash(git:*)"], &[], &[], None))
            .with_layer(SettingsScope::User, layer(&["Bash(*)"], &[], &[], None));

        let res = resolve(&InvocationContext::bash("git push --force"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Deny);
        assert_eq!(res.scope(), Some(SettingsScope::Managed));
    }

    #[test]
    fn test_deny_checked_first_within_scope() {
        // Both deny and allow match in the same scope; deny is consulted first
        let scopes = ScopeSet::new().with_layer(
            SettingsScope::Project,
            layer(&["Bash(git:*)"], &[], &["Bash(git push:*)"], None),
        );

        let res = resolve(&InvocationContext::bash("git push origin"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Deny);

        let res = resolve(&InvocationContext::bash("git status"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Allow);
    }

    #[test]
    fn test_default_mode_applies_when_nothing_matches() {
        let scopes = ScopeSet::new()
            .with_layer(
                SettingsScope::Project,
                layer(&[], &[], &[], Some(Disposition::Deny)),
            )
            .with_layer(
                SettingsScope::User,
                layer(&[], &[], &[], Some(Disposition::Allow)),
            );

        // Project outranks user for defaultMode too
        let res = resolve(&InvocationContext::bash("whoami"), &scopes).unwrap();
        assert_eq!(res.disposition, Disposition::Deny);
        assert!(res.matched.is_none());
    }

    #[test]
    fn test_default_is_ask_with_no_rules_at_all() {
        let res = resolve(&InvocationContext::bash("ls"), &ScopeSet::new()).unwrap();
        assert_eq!(res.disposition, Disposition::Ask);
        assert!(res.matched.is_none());
    }

    #[test]
    fn test_deterministic() {
        let scopes = ScopeSet::new()
            .with_layer(SettingsScope::Project, layer(&["Bash(git:*)"], &[], &[], None))
            .with_layer(SettingsScope::User, layer(&[], &["Bash(*)"], &[], None));

        let ctx = InvocationContext::bash("git diff");
        let first = resolve(&ctx, &scopes).unwrap();
        let second = resolve(&ctx, &scopes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let scopes = ScopeSet::new().with_layer(
            SettingsScope::Project,
            layer(&["Bash(git:*"], &[], &[], None),
        );
        let err = resolve(&InvocationContext::bash("ls"), &scopes).unwrap_err();
        assert!(matches!(err, crate::core::ConfigError::InvalidPattern { .. }));
    }
}
