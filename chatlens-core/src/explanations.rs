//! Typed view over the optional explanations document.
//!
//! Every top-level section is independent. A section that is missing, or
//! whose JSON shape is not what the dashboard expects, reads as `None`; the
//! other sections are unaffected. Entry order follows the document.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Narrative for one conversation category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryDetail {
    pub description: String,
    pub keywords: Vec<String>,
}

/// Narrative for one interaction mode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModeDetail {
    pub description: String,
    pub top3_categories: Vec<String>,
}

/// Interpretation of one radar axis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadarExplanation {
    pub interpretation: String,
    pub algorithm: String,
}

/// Name to description pairs, in document order.
pub type Descriptions = Vec<(String, String)>;

/// The three optional subsections of `technical_details`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechnicalDetails {
    pub languages: Option<Descriptions>,
    pub tools: Option<Descriptions>,
    pub modalities: Option<Descriptions>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplanationsDocument {
    sections: Map<String, Value>,
}

impl ExplanationsDocument {
    /// Document with no sections; suppresses every explanation panel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a parsed value. Anything other than an object reads as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(sections) => Self { sections },
            _ => Self::empty(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Raw section by name.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn conversation_types_details(&self) -> Option<Vec<(String, CategoryDetail)>> {
        self.entries("conversation_types_details")
    }

    pub fn technical_details(&self) -> Option<TechnicalDetails> {
        let details = self.object("technical_details")?;
        Some(TechnicalDetails {
            languages: descriptions(details.get("languages")),
            tools: descriptions(details.get("tools")),
            modalities: descriptions(details.get("modalities")),
        })
    }

    /// Free-form time-of-day narrative. An empty string counts as absent.
    pub fn time_analysis(&self) -> Option<&str> {
        match self.section("time_analysis") {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn interaction_details(&self) -> Option<Vec<(String, ModeDetail)>> {
        self.entries("interaction_details")
    }

    pub fn radar_explanations(&self) -> Option<Vec<(String, RadarExplanation)>> {
        self.entries("radar_explanations")
    }

    fn object(&self, name: &str) -> Option<&Map<String, Value>> {
        match self.section(name) {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                tracing::debug!(section = name, kind = kind(other), "Ignoring malformed section");
                None
            }
            None => None,
        }
    }

    /// Section entries parsed as `T`. Entries that do not fit are dropped.
    fn entries<T: DeserializeOwned>(&self, name: &str) -> Option<Vec<(String, T)>> {
        let map = self.object(name)?;
        let entries = map
            .iter()
            .filter_map(|(key, value)| match T::deserialize(value) {
                Ok(parsed) => Some((key.clone(), parsed)),
                Err(e) => {
                    tracing::debug!(section = name, key = %key, error = %e, "Skipping malformed entry");
                    None
                }
            })
            .collect();
        Some(entries)
    }
}

fn descriptions(value: Option<&Value>) -> Option<Descriptions> {
    let map = value?.as_object()?;
    Some(
        map.iter()
            .filter_map(|(name, desc)| Some((name.clone(), desc.as_str()?.to_string())))
            .collect(),
    )
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_empty() {
        assert!(ExplanationsDocument::from_value(json!("raw text")).is_empty());
        assert!(ExplanationsDocument::from_value(json!(null)).is_empty());
        assert!(ExplanationsDocument::parse("{}").unwrap().is_empty());
        assert!(ExplanationsDocument::parse("{not json").is_err());
    }

    #[test]
    fn test_entries_keep_document_order() {
        let doc = ExplanationsDocument::parse(
            r#"{"conversation_types_details": {
                "daily": {"description": "d", "keywords": ["travel"]},
                "technical": {"description": "t", "keywords": ["R", "SQL"]},
                "business": {"description": "b", "keywords": []}
            }}"#,
        )
        .unwrap();
        let keys: Vec<String> = doc
            .conversation_types_details()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["daily", "technical", "business"]);
    }

    #[test]
    fn test_entry_fields_default() {
        let doc = ExplanationsDocument::from_value(json!({
            "radar_explanations": {"tech_depth": {"interpretation": "deep"}}
        }));
        let entries = doc.radar_explanations().unwrap();
        assert_eq!(entries[0].1.interpretation, "deep");
        assert_eq!(entries[0].1.algorithm, "");
    }

    #[test]
    fn test_malformed_entry_dropped() {
        let doc = ExplanationsDocument::from_value(json!({
            "interaction_details": {
                "qa": "not an object",
                "guidance": {"description": "g", "top3_categories": ["a", "b", "c"]}
            }
        }));
        let entries = doc.interaction_details().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "guidance");
    }

    #[test]
    fn test_malformed_section_reads_absent() {
        let doc = ExplanationsDocument::from_value(json!({
            "radar_explanations": ["tech_depth"],
            "time_analysis": 42
        }));
        assert!(!doc.is_empty());
        assert!(doc.radar_explanations().is_none());
        assert!(doc.time_analysis().is_none());
    }

    #[test]
    fn test_technical_subsections_independent() {
        let doc = ExplanationsDocument::from_value(json!({
            "technical_details": {
                "tools": {"Search": "looks things up", "Broken": 3}
            }
        }));
        let details = doc.technical_details().unwrap();
        assert!(details.languages.is_none());
        assert!(details.modalities.is_none());
        assert_eq!(
            details.tools.unwrap(),
            vec![("Search".to_string(), "looks things up".to_string())]
        );
    }

    #[test]
    fn test_time_analysis() {
        let doc = ExplanationsDocument::from_value(json!({"time_analysis": "Evenings dominate."}));
        assert_eq!(doc.time_analysis(), Some("Evenings dominate."));
        let blank = ExplanationsDocument::from_value(json!({"time_analysis": ""}));
        assert_eq!(blank.time_analysis(), None);
    }
}
