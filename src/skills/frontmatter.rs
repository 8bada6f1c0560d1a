//! YAML frontmatter parsing for skill and subagent Markdown files
//!
//! Skill documents open with a `---` delimited header of simple
//! `key: value` pairs. Values may continue onto following lines indented
//! by two spaces; surrounding quotes are stripped. Anything richer than
//! that (nested maps, lists) is out of scope — the asset format doesn't
//! use it.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A---\s*\n(.*?)\n---").expect("valid regex"))
}

fn key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w[\w-]*):\s*(.*)$").expect("valid regex"))
}

/// Parsed frontmatter fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: BTreeMap<String, String>,
}

impl Frontmatter {
    /// Parse a document. Returns the frontmatter and the body following
    /// the closing `---`, or `None` if the document has no frontmatter.
    pub fn parse(content: &str) -> Option<(Frontmatter, String)> {
        let captures = header_regex().captures(content)?;
        let header = captures.get(1)?.as_str();
        let body = content[captures.get(0)?.end()..]
            .trim_start_matches('\n')
            .to_string();

        fn flush(key: &Option<String>, value: &[String], fields: &mut BTreeMap<String, String>) {
            if let Some(key) = key {
                let joined = value.join("\n");
                fields.insert(key.clone(), strip_quotes(joined.trim()).to_string());
            }
        }

        let mut fields = BTreeMap::new();
        let mut current_key: Option<String> = None;
        let mut current_value: Vec<String> = Vec::new();

        for line in header.lines() {
            if let Some(caps) = key_regex().captures(line) {
                flush(&current_key, &current_value, &mut fields);
                current_key = Some(caps[1].to_string());
                current_value = vec![caps[2].to_string()];
            } else if current_key.is_some() && line.starts_with("  ") {
                current_value.push(line.trim().to_string());
            }
        }
        flush(&current_key, &current_value, &mut fields);

        Some((Frontmatter { fields }, body))
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    /// The `name` field
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// The `description` field
    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// All fields in key order
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
