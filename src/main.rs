//! `policy-hook` — permission gate for PreToolUse hook wiring
//!
//! Reads a tool-event payload from stdin, resolves the permission
//! disposition against the settings scopes of the current directory,
//! prints the decision as JSON on stdout, and exits 2 on deny with the
//! reason on stderr (0 otherwise, so allow/ask pass through to the
//! normal flow).

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use agent_policy_sdk::permissions::{resolve, Disposition, InvocationContext};
use agent_policy_sdk::settings::ScopeSet;

#[derive(Debug, Deserialize)]
struct HookInput {
    tool_name: String,
    #[serde(default)]
    tool_input: Value,
}

#[derive(Debug, Serialize)]
struct Decision {
    disposition: Disposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let hook_input: HookInput = serde_json::from_str(&input)?;

    let project_root = std::env::current_dir()?;
    let scopes = ScopeSet::from_disk(&project_root)?;

    let ctx = InvocationContext::new(hook_input.tool_name, hook_input.tool_input);
    let resolution = resolve(&ctx, &scopes)?;

    let decision = Decision {
        disposition: resolution.disposition,
        rule: resolution.matched.as_ref().map(|r| r.raw.clone()),
        scope: resolution.scope().map(|s| s.to_string()),
    };
    println!("{}", serde_json::to_string(&decision)?);

    if decision.disposition == Disposition::Deny {
        let rule = decision.rule.as_deref().unwrap_or("default mode");
        eprintln!("Denied by permission rule: {rule}");
        std::process::exit(2);
    }

    Ok(())
}
