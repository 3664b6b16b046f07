//! Derived analysis structures
//!
//! Everything here is recomputed from the journal on every call and never
//! persisted. Field names serialise in camelCase so the export snapshot
//! keeps the shape dashboards already consume.

use crate::journal::TimeSpan;
use serde::{Deserialize, Serialize};

/// Classification attached to a detected pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Keyword seen 5 or more times
    HighFrequency,
    /// Keyword seen 3 or 4 times
    ModerateFrequency,
    /// Day-of-week skew
    Weekly,
}

/// A frequency or temporal signal over a batch of entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    Frequency {
        symptom: String,
        count: usize,
        pattern: PatternKind,
        description: String,
    },
    Temporal {
        day: String,
        /// Share of all entries that fell on `day` (0-1)
        frequency: f64,
        pattern: PatternKind,
        description: String,
    },
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Frequency { pattern, .. } | Pattern::Temporal { pattern, .. } => *pattern,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Pattern::Frequency { description, .. } | Pattern::Temporal { description, .. } => {
                description
            }
        }
    }

    pub fn is_high_frequency(&self) -> bool {
        self.kind() == PatternKind::HighFrequency
    }
}

/// Direction of the severity trend. Ties count as decreasing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Recent vs. historical mean confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeverityTrend {
    pub recent: f64,
    pub historical: f64,
    pub trend: TrendDirection,
    pub change: f64,
}

impl SeverityTrend {
    pub fn is_increasing(&self) -> bool {
        self.trend == TrendDirection::Increasing
    }
}

/// Trend section of an analysis. Serialises as `{}` when there was not
/// enough data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trends {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityTrend>,
}

impl Trends {
    pub fn is_empty(&self) -> bool {
        self.severity.is_none()
    }

    /// Number of trends present
    pub fn len(&self) -> usize {
        usize::from(self.severity.is_some())
    }

    pub fn is_increasing(&self) -> bool {
        self.severity.map(|s| s.is_increasing()).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Frequency,
    Trend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,
    Warning,
    Positive,
}

impl std::fmt::Display for InsightSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightSeverity::Info => write!(f, "info"),
            InsightSeverity::Warning => write!(f, "warning"),
            InsightSeverity::Positive => write!(f, "positive"),
        }
    }
}

/// User-facing observation derived from patterns and trends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub severity: InsightSeverity,
}

/// Coarse categorical level, used for overall risk and indicator severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskFactorKind {
    Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub kind: RiskFactorKind,
    pub factor: String,
    pub description: String,
    pub severity: RiskLevel,
}

/// Roll-up counts for an analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub total_patterns: usize,
    pub significant_trends: usize,
    pub key_insights: usize,
    pub overall_risk: RiskLevel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    RecurringSymptom,
    SymptomCluster,
}

/// A recurring-symptom signal that crossed the chronic thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChronicIndicator {
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub symptom: String,
    /// Occurrences per week
    pub frequency: f64,
    pub occurrences: usize,
    pub severity: RiskLevel,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    ChronicPattern,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: InsightSeverity,
    pub message: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NextStep {
    pub priority: Priority,
    pub action: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewInsight {
    pub total_entries: usize,
    /// Distinct vocabulary keywords present across all entries
    pub unique_symptoms: usize,
    pub time_span: TimeSpan,
    pub average_entries_per_week: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Moderate,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Moderate => write!(f, "moderate"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendInsightKind {
    SeverityTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendInsight {
    #[serde(rename = "type")]
    pub kind: TrendInsightKind,
    pub trend: TrendDirection,
    pub description: String,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}
