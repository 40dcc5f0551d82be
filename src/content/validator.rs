//! Put-boundary payload validation.
//!
//! Every [`ContentKind`] maps to a fixed list of rules interpreted by one
//! small evaluator. Rules are data, not code — nothing caller-supplied ever
//! runs, and adding a kind means adding a rule table entry. All violated
//! rules are reported, not just the first.

use serde_json::{Map, Value};

use super::ContentKind;

/// One structural requirement on a payload's sections.
#[derive(Debug, Clone, Copy)]
enum SectionRule {
    /// The named section must exist and be a non-empty string.
    RequireText(&'static str),
    /// At least one of the named sections must be a non-empty string.
    AnyText(&'static [&'static str]),
    /// When present, the named section must be an array of strings.
    StringList(&'static str),
}

/// The closed rule table, one entry per kind.
fn rules_for(kind: ContentKind) -> &'static [SectionRule] {
    match kind {
        ContentKind::Overview => &[SectionRule::RequireText("overview")],
        ContentKind::Detail => &[
            SectionRule::RequireText("title"),
            SectionRule::StringList("recommendations"),
        ],
        ContentKind::Insight => &[SectionRule::AnyText(&["overview", "details"])],
    }
}

/// Validates an opaque payload against `kind`'s schema.
///
/// A payload must be a JSON object whose sections are strings or arrays of
/// strings, plus whatever the kind's own rules require. Returns every issue
/// found.
pub fn validate_payload(kind: ContentKind, payload: &Value) -> Result<(), Vec<String>> {
    let Some(sections) = section_map(payload) else {
        return Err(vec!["payload must be a JSON object".to_owned()]);
    };

    let mut issues = Vec::new();

    for (name, value) in sections {
        if !is_section_value(value) {
            issues.push(format!(
                "section `{name}` must be a string or an array of strings"
            ));
        }
    }

    for rule in rules_for(kind) {
        if let Some(issue) = check_rule(rule, sections) {
            issues.push(issue);
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Sections live either under a `sections` wrapper or at the top level.
fn section_map(payload: &Value) -> Option<&Map<String, Value>> {
    match payload.get("sections") {
        Some(Value::Object(map)) => Some(map),
        _ => payload.as_object(),
    }
}

fn is_section_value(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

fn check_rule(rule: &SectionRule, sections: &Map<String, Value>) -> Option<String> {
    match rule {
        SectionRule::RequireText(name) => match sections.get(*name) {
            Some(Value::String(text)) if !text.trim().is_empty() => None,
            _ => Some(format!("section `{name}` must be a non-empty string")),
        },
        SectionRule::AnyText(names) => {
            let satisfied = names.iter().any(|name| {
                matches!(sections.get(*name), Some(Value::String(text)) if !text.trim().is_empty())
            });
            if satisfied {
                None
            } else {
                Some(format!(
                    "at least one of [{}] must be a non-empty string",
                    names.join(", ")
                ))
            }
        }
        SectionRule::StringList(name) => match sections.get(*name) {
            None => None,
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => None,
            _ => Some(format!(
                "section `{name}` must be an array of strings when present"
            )),
        },
    }
}
