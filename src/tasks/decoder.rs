//! Turns raw completion text into task records.
//!
//! The service is only asked, not forced, to answer with a JSON array, so the
//! decoder walks an ordered list of tiers. Each tier either produces records or
//! declares itself inapplicable; the last tier always produces something.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const PLACEHOLDER_TITLE: &str = "Generated Task";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description generated";

/// One suggested task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub description: String,
}

impl TaskRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A single decoding strategy.
pub trait DecodeTier: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means this tier does not recognize the input.
    fn decode(&self, raw: &str) -> Option<Vec<TaskRecord>>;
}

/// Parses the whole response as JSON: an array of task objects or a single value.
pub struct JsonTier;

impl JsonTier {
    fn field(object: &Map<String, Value>, key: &str) -> String {
        match object.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn record(value: &Value) -> TaskRecord {
        match value.as_object() {
            Some(object) => TaskRecord {
                title: Self::field(object, "title"),
                description: Self::field(object, "description"),
            },
            None => TaskRecord::new("", ""),
        }
    }
}

impl DecodeTier for JsonTier {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, raw: &str) -> Option<Vec<TaskRecord>> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Some(items.iter().map(Self::record).collect()),
            Ok(value) => Some(vec![Self::record(&value)]),
            Err(err) => {
                debug!(error = %err, "Response is not valid JSON");
                None
            }
        }
    }
}

/// Pulls the first quoted `title` and `description` values out of almost-JSON.
pub struct FieldPatternTier;

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""title":\s*"([^"]+)""#).expect("valid title pattern"))
}

fn description_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""description":\s*"([^"]+)""#).expect("valid description pattern")
    })
}

impl DecodeTier for FieldPatternTier {
    fn name(&self) -> &'static str {
        "field-pattern"
    }

    fn decode(&self, raw: &str) -> Option<Vec<TaskRecord>> {
        let title = title_pattern().captures(raw)?.get(1)?.as_str();
        let description = description_pattern().captures(raw)?.get(1)?.as_str();
        Some(vec![TaskRecord::new(title, description)])
    }
}

/// Last resort: first line is the title, the rest is the description.
pub struct LineSplitTier;

impl DecodeTier for LineSplitTier {
    fn name(&self) -> &'static str {
        "line-split"
    }

    fn decode(&self, raw: &str) -> Option<Vec<TaskRecord>> {
        let mut lines = raw.split('\n').filter(|line| !line.is_empty());

        let title = lines.next().unwrap_or(PLACEHOLDER_TITLE).to_string();
        let rest: Vec<&str> = lines.collect();
        let description = if rest.is_empty() {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            rest.join(" ")
        };

        Some(vec![TaskRecord { title, description }])
    }
}

/// Ordered list of tiers; the first applicable one wins.
pub struct TaskDecoder {
    tiers: Vec<Box<dyn DecodeTier>>,
}

impl Default for TaskDecoder {
    fn default() -> Self {
        Self {
            tiers: vec![
                Box::new(JsonTier),
                Box::new(FieldPatternTier),
                Box::new(LineSplitTier),
            ],
        }
    }
}

impl TaskDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    pub fn decode(&self, raw: &str) -> Vec<TaskRecord> {
        for (index, tier) in self.tiers.iter().enumerate() {
            if let Some(records) = tier.decode(raw) {
                if index > 0 {
                    warn!(tier = tier.name(), "Decoded response with fallback tier");
                } else {
                    debug!(count = records.len(), "Decoded response as JSON");
                }
                return records;
            }
        }

        // Only reachable with a custom tier list that lacks a catch-all.
        LineSplitTier.decode(raw).unwrap_or_default()
    }
}

/// Decode with the default tier order.
pub fn decode(raw: &str) -> Vec<TaskRecord> {
    TaskDecoder::default().decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tier_order() {
        assert_eq!(
            TaskDecoder::new().tier_names(),
            vec!["json", "field-pattern", "line-split"]
        );
    }

    #[test]
    fn test_json_array_single_task() {
        let raw = r#"[{"title":"Crazy Painter","description":"Paint with your feet."}]"#;
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("Crazy Painter", "Paint with your feet.")]
        );
    }

    #[test]
    fn test_json_array_preserves_order_and_values() {
        let expected: Vec<TaskRecord> = (1..=5)
            .map(|i| TaskRecord::new(format!("Task {}", i), format!("Do thing \"{}\" now", i)))
            .collect();
        let raw = serde_json::to_string_pretty(&expected).unwrap();

        assert_eq!(decode(&raw), expected);
    }

    #[test]
    fn test_json_empty_array() {
        assert_eq!(decode("[]"), Vec::<TaskRecord>::new());
    }

    #[test]
    fn test_json_single_object_is_wrapped() {
        let raw = r#"  {"title": "Time Traveler", "description": "Meet your ancestors."}  "#;
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("Time Traveler", "Meet your ancestors.")]
        );
    }

    #[test]
    fn test_json_fields_taken_as_is() {
        let raw = r#"[{"title": "Only title"}, {"title": 7, "description": null}, "loose"]"#;
        assert_eq!(
            decode(raw),
            vec![
                TaskRecord::new("Only title", ""),
                TaskRecord::new("7", ""),
                TaskRecord::new("", ""),
            ]
        );
    }

    #[test]
    fn test_json_scalar_is_wrapped_as_empty_record() {
        assert_eq!(decode("null"), vec![TaskRecord::new("", "")]);
        assert_eq!(decode("42"), vec![TaskRecord::new("", "")]);
        assert_eq!(
            JsonTier.decode("\"just a string\""),
            Some(vec![TaskRecord::new("", "")])
        );
    }

    #[test]
    fn test_field_pattern_on_broken_json() {
        let raw = "Sure! Here you go:\n[\n  { \"title\": \"Sock Poet\", \"description\": \"Write an ode to a lost sock.\" },\n  { \"title\": \"Cut off";
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("Sock Poet", "Write an ode to a lost sock.")]
        );
    }

    #[test]
    fn test_field_pattern_takes_first_occurrence_only() {
        let raw = r#"{"title": "First", "description": "One"}, {"title": "Second", "description": "Two"}"#;
        assert_eq!(decode(raw), vec![TaskRecord::new("First", "One")]);
    }

    #[test]
    fn test_field_pattern_without_whitespace() {
        let raw = r#"garbage "title":"X" more "description":"Y" trailing"#;
        assert_eq!(decode(raw), vec![TaskRecord::new("X", "Y")]);
    }

    #[test]
    fn test_field_pattern_is_case_sensitive() {
        let raw = "\"Title\": \"X\"\n\"Description\": \"Y\"";
        assert_eq!(FieldPatternTier.decode(raw), None);
    }

    #[test]
    fn test_field_pattern_needs_both_fields() {
        let raw = "\"title\": \"Lonely\"\nno description here";
        assert_eq!(FieldPatternTier.decode(raw), None);
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("\"title\": \"Lonely\"", "no description here")]
        );
    }

    #[test]
    fn test_line_split_example() {
        let raw = "Here is your task\nTitle: none\nJust do it.";
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("Here is your task", "Title: none Just do it.")]
        );
    }

    #[test]
    fn test_line_split_skips_empty_lines() {
        let raw = "\n\nHeadline\n\n\nfirst part\n\nsecond part\n";
        assert_eq!(
            decode(raw),
            vec![TaskRecord::new("Headline", "first part second part")]
        );
    }

    #[test]
    fn test_line_split_single_line_uses_placeholder_description() {
        assert_eq!(
            decode("Just one line"),
            vec![TaskRecord::new("Just one line", PLACEHOLDER_DESCRIPTION)]
        );
    }

    #[test]
    fn test_empty_input_uses_placeholders() {
        assert_eq!(
            decode(""),
            vec![TaskRecord::new("Generated Task", "No description generated")]
        );
    }

    #[test]
    fn test_only_newlines_uses_placeholders() {
        assert_eq!(
            decode("\n\n\n"),
            vec![TaskRecord::new(PLACEHOLDER_TITLE, PLACEHOLDER_DESCRIPTION)]
        );
    }

    #[test]
    fn test_custom_tier_list_without_catch_all() {
        let decoder = TaskDecoder {
            tiers: vec![Box::new(JsonTier)],
        };
        assert_eq!(
            decoder.decode("not json"),
            vec![TaskRecord::new("not json", PLACEHOLDER_DESCRIPTION)]
        );
    }

    #[test]
    fn test_task_record_serializes() {
        let record = TaskRecord::new("A", "B");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"title": "A", "description": "B"})
        );
    }
}
