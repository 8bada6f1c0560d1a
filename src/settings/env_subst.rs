//! Environment variable substitution in configuration values
//!
//! Supports `${VAR}` and `${VAR:-default}`. An unset variable with no
//! default expands to the empty string. A `$` not followed by `{` is
//! left alone.

use std::sync::OnceLock;

use regex::Regex;

fn subst_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ${NAME} or ${NAME:-default}; default may be empty
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("valid regex")
    })
}

/// Expand `${VAR}` references using the given lookup function
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    subst_regex()
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match lookup(name) {
                Some(value) => value,
                None => caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            }
        })
        .into_owned()
}

/// Expand `${VAR}` references against the process environment
pub fn expand(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/dev".to_string()),
            "TOKEN" => Some("s3cret".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(expand_with("${HOME}/.claude", lookup), "/home/dev/.claude");
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(expand_with("${PORT:-8080}", lookup), "8080");
        assert_eq!(expand_with("${PORT:-}", lookup), "");
    }

    #[test]
    fn test_default_ignored_when_set() {
        assert_eq!(expand_with("${TOKEN:-fallback}", lookup), "s3cret");
    }

    #[test]
    fn test_unset_without_default_is_empty() {
        assert_eq!(expand_with("x${MISSING}y", lookup), "xy");
    }

    #[test]
    fn test_multiple_references() {
        assert_eq!(
            expand_with("${HOME}:${PORT:-80}:${TOKEN}", lookup),
            "/home/dev:80:s3cret"
        );
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        assert_eq!(expand_with("cost is $5 and ${HOME}", lookup), "cost is $5 and /home/dev");
        assert_eq!(expand_with("$HOME", lookup), "$HOME");
    }
}
