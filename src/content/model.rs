use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// One named section of generated content.
///
/// Generators return either prose or a list of short items per section; both
/// shapes are accepted interchangeably on the wire (untagged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    List(Vec<String>),
}

impl SectionValue {
    /// The section as prose, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SectionValue::Text(text) => Some(text),
            SectionValue::List(_) => None,
        }
    }
}

impl From<&str> for SectionValue {
    fn from(text: &str) -> Self {
        SectionValue::Text(text.to_owned())
    }
}

impl From<String> for SectionValue {
    fn from(text: String) -> Self {
        SectionValue::Text(text)
    }
}

impl From<Vec<String>> for SectionValue {
    fn from(items: Vec<String>) -> Self {
        SectionValue::List(items)
    }
}

/// What a generator hands back: named sections plus a placeholder flag.
///
/// Placeholder content (e.g. "not enough data yet") is served to the caller
/// but never cached, so the next request generates again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Named sections in stable order.
    pub sections: BTreeMap<String, SectionValue>,
    /// True when the generator could not produce real content.
    #[serde(default)]
    pub placeholder: bool,
}

impl GeneratedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty placeholder payload that the cache must not retain.
    pub fn placeholder() -> Self {
        GeneratedContent {
            sections: BTreeMap::new(),
            placeholder: true,
        }
    }

    /// Adds or replaces a named section.
    pub fn with_section(mut self, name: impl Into<String>, value: impl Into<SectionValue>) -> Self {
        self.sections.insert(name.into(), value.into());
        self
    }

    /// The named section as prose, if present.
    pub fn section_text(&self, name: &str) -> Option<&str> {
        self.sections.get(name).and_then(SectionValue::as_text)
    }

    /// Serializes into the opaque payload the cache stores.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Consumer-facing view of one cached recommendation payload.
///
/// Built leniently: whatever fields the payload is missing default to empty,
/// so readers render partial records instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationContent {
    pub title: String,
    pub overview: String,
    pub details: String,
    pub disclaimer: String,
    pub recommendations: Vec<String>,
}

impl RecommendationContent {
    /// Extracts the consumer view from an opaque cached payload.
    ///
    /// Accepts both the wrapped shape (`{"sections": {..}}`) produced by
    /// [`GeneratedContent`] and a bare section object.
    pub fn from_value(value: &Value) -> Self {
        let sections = match value.get("sections") {
            Some(Value::Object(map)) => map,
            _ => match value.as_object() {
                Some(map) => map,
                None => return Self::default(),
            },
        };
        RecommendationContent {
            title: text_field(sections, "title"),
            overview: text_field(sections, "overview"),
            details: text_field(sections, "details"),
            disclaimer: text_field(sections, "disclaimer"),
            recommendations: list_field(sections, "recommendations"),
        }
    }
}

fn text_field(map: &Map<String, Value>, name: &str) -> String {
    match map.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn list_field(map: &Map<String, Value>, name: &str) -> Vec<String> {
    match map.get(name) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(text)) if !text.is_empty() => vec![text.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn section_values_accept_prose_and_lists() {
        let content = GeneratedContent::new()
            .with_section("overview", "Keep it simple.")
            .with_section("recommendations", vec!["Cleanse.".to_owned(), "Protect.".to_owned()]);

        assert_eq!(content.section_text("overview"), Some("Keep it simple."));
        assert_eq!(content.section_text("recommendations"), None);

        let value = content.to_value().unwrap();
        assert_eq!(value["sections"]["overview"], json!("Keep it simple."));
        assert_eq!(
            value["sections"]["recommendations"],
            json!(["Cleanse.", "Protect."])
        );
        assert_eq!(value["placeholder"], json!(false));
    }

    #[test]
    fn untagged_sections_round_trip() {
        let value = json!({
            "sections": {"overview": "Short.", "steps": ["One", "Two"]},
            "placeholder": false
        });
        let content: GeneratedContent = serde_json::from_value(value).unwrap();
        assert_eq!(content.section_text("overview"), Some("Short."));
        assert_eq!(
            content.sections.get("steps"),
            Some(&SectionValue::List(vec!["One".into(), "Two".into()]))
        );
    }

    #[test]
    fn missing_placeholder_flag_defaults_to_false() {
        let content: GeneratedContent =
            serde_json::from_value(json!({"sections": {}})).unwrap();
        assert!(!content.placeholder);
    }

    #[test]
    fn consumer_view_defaults_missing_fields() {
        let view = RecommendationContent::from_value(&json!({
            "sections": {"title": "Morning routine", "recommendations": ["Use SPF."]}
        }));
        assert_eq!(view.title, "Morning routine");
        assert_eq!(view.overview, "");
        assert_eq!(view.disclaimer, "");
        assert_eq!(view.recommendations, vec!["Use SPF.".to_owned()]);
    }

    #[test]
    fn consumer_view_accepts_bare_section_objects() {
        let view = RecommendationContent::from_value(&json!({
            "overview": "Hydration first.",
            "details": ["Step one.", "Step two."],
            "recommendations": "Drink water."
        }));
        assert_eq!(view.overview, "Hydration first.");
        assert_eq!(view.details, "Step one.\nStep two.");
        assert_eq!(view.recommendations, vec!["Drink water.".to_owned()]);
    }

    #[test]
    fn consumer_view_of_a_non_object_is_all_defaults() {
        let view = RecommendationContent::from_value(&json!("not an object"));
        assert_eq!(view, RecommendationContent::default());
    }
}
