//! Pattern Analysis Engine
//!
//! Pure, synchronous heuristics over a borrowed snapshot of the journal:
//!
//! - **keywords**: Fixed-vocabulary keyword extraction and counting
//! - **frequency**: Keywords crossing the 3 / 5 occurrence thresholds
//! - **temporal**: Day-of-week skew (monthly analysis reserved)
//! - **severity**: Recent vs. historical confidence trend
//! - **risk**: Linear risk score and risk factors
//! - **chronic**: Recurring-symptom indicators (clusters reserved)
//! - **insights**: Insights, alerts, next steps and overview
//!
//! Every call recomputes from its input; nothing is cached and the input
//! is never mutated. Empty or short journals produce empty results rather
//! than errors.
//!
//! # Example
//!
//! ```rust
//! use symptomsense::analysis::analyze_symptom_patterns;
//! use symptomsense::journal::SymptomEntry;
//!
//! let entries = vec![
//!     SymptomEntry::new("headache and fatigue"),
//!     SymptomEntry::new("headache again"),
//!     SymptomEntry::new("headache still"),
//! ];
//!
//! let analysis = analyze_symptom_patterns(&entries);
//! assert_eq!(analysis.summary.total_patterns, analysis.patterns.len());
//! ```

pub mod chronic;
pub mod frequency;
pub mod insights;
pub mod keywords;
pub mod risk;
pub mod severity;
pub mod temporal;
pub mod types;

pub use chronic::{identify_chronic_indicators, identify_symptom_clusters};
pub use frequency::analyze_frequency;
pub use insights::{
    generate_alerts, generate_insights, generate_next_steps, generate_overview_insight,
    generate_trend_insights, most_common_symptoms,
};
pub use keywords::{extract_keywords, KeywordCounts, SYMPTOM_VOCABULARY};
pub use risk::{identify_risk_factors, risk_score, score_risk};
pub use severity::analyze_severity_trend;
pub use temporal::{
    analyze_monthly, analyze_temporal, analyze_temporal_in, analyze_weekly, analyze_weekly_in,
};
pub use types::*;

use crate::journal::SymptomEntry;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Full pattern analysis of a journal snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    /// Frequency patterns followed by temporal patterns
    pub patterns: Vec<Pattern>,
    pub trends: Trends,
    pub insights: Vec<Insight>,
    pub risk_factors: Vec<RiskFactor>,
    pub summary: PatternSummary,
}

/// Analyze on the UTC calendar
pub fn analyze_symptom_patterns(entries: &[SymptomEntry]) -> PatternAnalysis {
    analyze_symptom_patterns_in(entries, &Utc)
}

/// Analyze with weekdays taken on the calendar of `tz`
pub fn analyze_symptom_patterns_in<Tz: TimeZone>(
    entries: &[SymptomEntry],
    tz: &Tz,
) -> PatternAnalysis {
    let counts = KeywordCounts::from_entries(entries);

    let mut patterns = frequency::frequency_patterns(&counts);
    patterns.extend(analyze_temporal_in(entries, tz));

    let trends = analyze_severity_trend(entries);
    let insights = generate_insights(&counts, &trends);
    let risk_factors = identify_risk_factors(&patterns);
    let summary = risk::summarize(&patterns, &trends, &insights);

    tracing::debug!(
        entries = entries.len(),
        patterns = patterns.len(),
        trend = trends.severity.is_some(),
        risk = %summary.overall_risk,
        "Analyzed symptom patterns"
    );

    PatternAnalysis {
        patterns,
        trends,
        insights,
        risk_factors,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap() + Duration::days(n)
    }

    fn entry(text: &str, n: i64) -> SymptomEntry {
        SymptomEntry::new(text).with_timestamp(day(n))
    }

    #[test]
    fn test_empty_journal() {
        let analysis = analyze_symptom_patterns(&[]);

        assert!(analysis.patterns.is_empty());
        assert!(analysis.trends.is_empty());
        assert!(analysis.insights.is_empty());
        assert!(analysis.risk_factors.is_empty());
        assert_eq!(analysis.summary.total_patterns, 0);
        assert_eq!(analysis.summary.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn test_three_day_headache_scenario() {
        let entries = vec![
            entry("bad headache and fatigue", 0),
            entry("headache again", 1),
            entry("headache still", 2),
        ];

        let frequency = analyze_frequency(&entries);
        assert!(frequency.contains(&Pattern::Frequency {
            symptom: "headache".to_string(),
            count: 3,
            pattern: PatternKind::ModerateFrequency,
            description: "headache reported 3 times".to_string(),
        }));

        let indicators = identify_chronic_indicators(&entries);
        assert!(indicators.iter().any(|i| i.symptom == "headache"));
    }

    #[test]
    fn test_ten_week_span_with_two_headaches() {
        let mut entries: Vec<_> = (0..10).map(|w| entry("cough", w * 7)).collect();
        entries[0] = entry("headache and cough", 0);
        entries[9] = entry("headache and cough", 70);

        let indicators = identify_chronic_indicators(&entries);
        assert!(indicators.iter().all(|i| i.symptom != "headache"));
    }

    #[test]
    fn test_patterns_frequency_before_temporal() {
        // Every entry on a Monday, nausea five times
        let entries: Vec<_> = (0..5).map(|w| entry("nausea", w * 7)).collect();
        let analysis = analyze_symptom_patterns(&entries);

        assert!(matches!(analysis.patterns[0], Pattern::Frequency { .. }));
        assert!(matches!(analysis.patterns[1], Pattern::Temporal { .. }));
        assert_eq!(analysis.risk_factors.len(), 1);
        assert_eq!(analysis.summary.total_patterns, 2);
        // high frequency (2) only, trend window not exceeded
        assert_eq!(analysis.summary.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn test_worsening_journal_is_high_risk() {
        let mut entries: Vec<_> = (0..3).map(|n| entry("fever", n).confidence(0.2)).collect();
        entries.extend((3..8).map(|n| entry("fever and cough", n).confidence(0.9)));

        let analysis = analyze_symptom_patterns(&entries);
        assert!(analysis.trends.is_increasing());
        // fever (8) and cough (5) high frequency = 4, increasing = 3, warning = 2
        assert_eq!(
            risk_score(&analysis.patterns, &analysis.trends, &analysis.insights),
            9
        );
        assert_eq!(analysis.summary.overall_risk, RiskLevel::High);
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let entries = vec![entry("cough", 0), entry("cough", 1), entry("cough", 2)];
        let json = serde_json::to_value(analyze_symptom_patterns(&entries)).unwrap();

        assert!(json.get("riskFactors").is_some());
        assert_eq!(json["summary"]["overallRisk"], "low");
        assert_eq!(json["trends"], serde_json::json!({}));
    }
}
