//! Core record types for the symptom journal
//!
//! This module defines the records that the storage layer owns and the
//! analysis engine borrows:
//! - `SymptomEntry`: One user-reported health event
//! - `Recommendation`: A generated piece of advice
//! - `FreeText`: Text that is either prose or an ordered list of labels
//! - `TimeSpan` and `DateRange`: Reporting period of a set of entries
//!
//! Optional fields are defaulted here, at the type boundary, so consumers
//! never repeat the defaulting rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Confidence used for an entry whose analysis did not report one
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Text that is either a free-form description or a short ordered list
/// of labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FreeText {
    Text(String),
    List(Vec<String>),
}

impl FreeText {
    /// Flatten to a single string. Lists are joined with `,`.
    pub fn as_text(&self) -> String {
        match self {
            FreeText::Text(text) => text.clone(),
            FreeText::List(items) => items.join(","),
        }
    }

    /// True when there is no text at all
    pub fn is_empty(&self) -> bool {
        match self {
            FreeText::Text(text) => text.trim().is_empty(),
            FreeText::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

impl From<&str> for FreeText {
    fn from(text: &str) -> Self {
        FreeText::Text(text.to_string())
    }
}

impl From<String> for FreeText {
    fn from(text: String) -> Self {
        FreeText::Text(text)
    }
}

impl From<Vec<String>> for FreeText {
    fn from(items: Vec<String>) -> Self {
        FreeText::List(items)
    }
}

impl std::fmt::Display for FreeText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// A single symptom report
///
/// Created once when the user submits a description and never mutated
/// afterwards; removal by id is the only lifecycle change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    /// Unique identifier assigned at creation
    pub entry_id: String,
    /// Creation time, the sole ordering key
    pub timestamp: DateTime<Utc>,
    /// What the user reported
    pub symptoms: FreeText,
    /// Optional elaboration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Candidate conditions from the symptom assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_diagnosis: Option<FreeText>,
    /// Assistant's self-reported confidence in [0, 1]
    #[serde(
        default,
        deserialize_with = "deserialize_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_score: Option<f64>,
}

impl SymptomEntry {
    /// Create a new entry with a fresh id and the current timestamp
    pub fn new(symptoms: impl Into<FreeText>) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            symptoms: symptoms.into(),
            details: None,
            potential_diagnosis: None,
            confidence_score: None,
        }
    }

    /// Builder method: set timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method: set id
    pub fn with_id(mut self, entry_id: impl Into<String>) -> Self {
        self.entry_id = entry_id.into();
        self
    }

    /// Builder method: add details
    pub fn details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.details = if details.trim().is_empty() {
            None
        } else {
            Some(details)
        };
        self
    }

    /// Builder method: add the potential diagnosis
    pub fn diagnosis(mut self, diagnosis: impl Into<FreeText>) -> Self {
        self.potential_diagnosis = Some(diagnosis.into());
        self
    }

    /// Builder method: set the confidence score, clamped to [0, 1].
    /// Non-finite values leave the score unset.
    pub fn confidence(mut self, score: f64) -> Self {
        self.confidence_score = normalize_confidence(score);
        self
    }

    /// Confidence used in trend math (0.5 when unset)
    pub fn effective_confidence(&self) -> f64 {
        self.confidence_score.unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Symptom text flattened for keyword search
    pub fn symptom_text(&self) -> String {
        self.symptoms.as_text()
    }
}

fn normalize_confidence(score: f64) -> Option<f64> {
    if score.is_finite() {
        Some(score.clamp(0.0, 1.0))
    } else {
        None
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(normalize_confidence))
}

/// Category of a recommendation. The set is open-ended; anything the
/// assistant invents lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecommendationType {
    Diet,
    Exercise,
    Lifestyle,
    General,
    Other(String),
}

impl From<String> for RecommendationType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "diet" => RecommendationType::Diet,
            "exercise" => RecommendationType::Exercise,
            "lifestyle" => RecommendationType::Lifestyle,
            "general" | "" => RecommendationType::General,
            _ => RecommendationType::Other(value.trim().to_string()),
        }
    }
}

impl From<&str> for RecommendationType {
    fn from(value: &str) -> Self {
        RecommendationType::from(value.to_string())
    }
}

impl From<RecommendationType> for String {
    fn from(value: RecommendationType) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationType::Diet => write!(f, "Diet"),
            RecommendationType::Exercise => write!(f, "Exercise"),
            RecommendationType::Lifestyle => write!(f, "Lifestyle"),
            RecommendationType::General => write!(f, "General"),
            RecommendationType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A generated piece of advice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub recommendation_text: String,
}

impl Recommendation {
    /// Create a new recommendation with a fresh id and the current timestamp
    pub fn new(kind: impl Into<RecommendationType>, text: impl Into<String>) -> Self {
        Self {
            recommendation_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind: kind.into(),
            recommendation_text: text.into(),
        }
    }

    /// Builder method: set timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Reporting period covered by a set of entries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSpan {
    /// Whole days between the earliest and latest entry
    pub days: i64,
    /// `ceil(days / 7)`
    pub weeks: i64,
    /// `ceil(days / 30)`
    pub months: i64,
}

impl TimeSpan {
    /// Compute the span of `entries`. All zero for an empty slice.
    pub fn of(entries: &[SymptomEntry]) -> Self {
        let (Some(earliest), Some(latest)) = (
            entries.iter().map(|e| e.timestamp).min(),
            entries.iter().map(|e| e.timestamp).max(),
        ) else {
            return Self::default();
        };

        let days = (latest - earliest).num_days();
        Self {
            days,
            weeks: div_ceil(days, 7),
            months: div_ceil(days, 30),
        }
    }

    /// Week count used as a denominator, never below one
    pub fn weeks_denominator(&self) -> f64 {
        self.weeks.max(1) as f64
    }
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// First and last calendar day (UTC) covered by a set of entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// `None` for an empty slice
    pub fn of(entries: &[SymptomEntry]) -> Option<Self> {
        let earliest = entries.iter().map(|e| e.timestamp).min()?;
        let latest = entries.iter().map(|e| e.timestamp).max()?;

        Some(Self {
            start: earliest.format("%Y-%m-%d").to_string(),
            end: latest.format("%Y-%m-%d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(day)
    }

    #[test]
    fn test_entry_creation() {
        let entry = SymptomEntry::new("headache").details("  ").confidence(0.8);

        assert!(!entry.entry_id.is_empty());
        assert_eq!(entry.symptom_text(), "headache");
        assert_eq!(entry.details, None);
        assert_eq!(entry.confidence_score, Some(0.8));
    }

    #[test]
    fn test_confidence_defaults_and_clamps() {
        assert_eq!(SymptomEntry::new("x").effective_confidence(), 0.5);
        assert_eq!(SymptomEntry::new("x").confidence(1.7).effective_confidence(), 1.0);
        assert_eq!(SymptomEntry::new("x").confidence(-3.0).effective_confidence(), 0.0);
        assert_eq!(SymptomEntry::new("x").confidence(f64::NAN).confidence_score, None);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = SymptomEntry::new(vec!["Headache".to_string(), "Fever".to_string()])
            .with_id("42")
            .with_timestamp(at(0))
            .diagnosis("Common cold");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["entryId"], "42");
        assert_eq!(json["symptoms"][1], "Fever");
        assert_eq!(json["potentialDiagnosis"], "Common cold");
        assert!(json.get("confidenceScore").is_none());

        let back: SymptomEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.symptom_text(), "Headache,Fever");
    }

    #[test]
    fn test_stored_confidence_is_clamped_on_load() {
        let json = r#"{"entryId":"1","timestamp":"2024-01-01T00:00:00Z","symptoms":"cough","confidenceScore":4.2}"#;
        let entry: SymptomEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.confidence_score, Some(1.0));
    }

    #[test]
    fn test_recommendation_type_is_open_ended() {
        assert_eq!(RecommendationType::from("diet"), RecommendationType::Diet);
        assert_eq!(
            RecommendationType::from("Sleep"),
            RecommendationType::Other("Sleep".to_string())
        );

        let rec = Recommendation::new("Exercise", "Walk daily");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "Exercise");
        assert_eq!(json["recommendationText"], "Walk daily");
    }

    #[test]
    fn test_time_span() {
        assert_eq!(TimeSpan::of(&[]), TimeSpan::default());

        let entries: Vec<_> = [0, 2, 15]
            .iter()
            .map(|&d| SymptomEntry::new("x").with_timestamp(at(d)))
            .collect();
        let span = TimeSpan::of(&entries);
        assert_eq!(span.days, 15);
        assert_eq!(span.weeks, 3);
        assert_eq!(span.months, 1);
    }

    #[test]
    fn test_time_span_same_day_has_one_week_denominator() {
        let entries = vec![SymptomEntry::new("x").with_timestamp(at(0))];
        let span = TimeSpan::of(&entries);
        assert_eq!(span.weeks, 0);
        assert_eq!(span.weeks_denominator(), 1.0);
    }

    #[test]
    fn test_date_range() {
        assert_eq!(DateRange::of(&[]), None);

        let entries = vec![
            SymptomEntry::new("x").with_timestamp(at(3)),
            SymptomEntry::new("y").with_timestamp(at(0)),
        ];
        let range = DateRange::of(&entries).unwrap();
        assert_eq!(range.start, "2024-01-01");
        assert_eq!(range.end, "2024-01-04");
    }
}
