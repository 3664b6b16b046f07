//! Insight, alert and next-step generation
//!
//! Turns patterns, trends and indicators into short user-facing records.
//! Rule-based only; no model is consulted here.

use super::keywords::KeywordCounts;
use super::types::{
    AlertKind, ChronicIndicator, ConfidenceLevel, HealthAlert, Insight, InsightKind,
    InsightSeverity, NextStep, OverviewInsight, Pattern, Priority, RiskLevel, SymptomCount,
    TrendDirection, TrendInsight, TrendInsightKind, Trends,
};
use crate::journal::{SymptomEntry, TimeSpan};

/// Alerts fire for indicators with at least this many occurrences
pub const ALERT_OCCURRENCES: usize = 5;

/// Trend change above which the trend insight is reported with high confidence
const HIGH_CONFIDENCE_CHANGE: f64 = 0.1;

/// A "most common symptoms" insight (top three keywords) and, when a
/// severity trend exists, a trend insight.
pub fn generate_insights(counts: &KeywordCounts, trends: &Trends) -> Vec<Insight> {
    let mut insights = Vec::new();

    let top: Vec<&str> = counts.ranked().into_iter().take(3).map(|(k, _)| k).collect();
    if !top.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Frequency,
            title: "Most Common Symptoms".to_string(),
            description: format!("Your most reported symptoms are: {}", top.join(", ")),
            severity: InsightSeverity::Info,
        });
    }

    if let Some(severity) = trends.severity {
        let (direction, level) = match severity.trend {
            TrendDirection::Increasing => ("worsening", InsightSeverity::Warning),
            TrendDirection::Decreasing => ("improving", InsightSeverity::Positive),
        };
        insights.push(Insight {
            kind: InsightKind::Trend,
            title: "Symptom Severity Trend".to_string(),
            description: format!("Your symptoms appear to be {} over time", direction),
            severity: level,
        });
    }

    insights
}

pub fn generate_trend_insights(trends: &Trends) -> Vec<TrendInsight> {
    trends
        .severity
        .iter()
        .map(|severity| TrendInsight {
            kind: TrendInsightKind::SeverityTrend,
            trend: severity.trend,
            description: format!("Symptom severity is {}", severity.trend),
            confidence: if severity.change > HIGH_CONFIDENCE_CHANGE {
                ConfidenceLevel::High
            } else {
                ConfidenceLevel::Moderate
            },
        })
        .collect()
}

/// One warning per indicator that is high severity or seen five or more
/// times.
///
/// Note: indicators are currently always `Moderate`, so only the
/// occurrence check can fire.
pub fn generate_alerts(indicators: &[ChronicIndicator]) -> Vec<HealthAlert> {
    indicators
        .iter()
        .filter(|i| i.severity == RiskLevel::High || i.occurrences >= ALERT_OCCURRENCES)
        .map(|i| HealthAlert {
            kind: AlertKind::ChronicPattern,
            severity: InsightSeverity::Warning,
            message: format!(
                "Recurring {} detected - consider medical consultation",
                i.symptom
            ),
            recommendation: i.recommendation.clone(),
        })
        .collect()
}

/// Consultation step when indicators exist, diary step for more than
/// three patterns, and always a closing monitoring step.
pub fn generate_next_steps(patterns: &[Pattern], indicators: &[ChronicIndicator]) -> Vec<NextStep> {
    let mut steps = Vec::new();

    if !indicators.is_empty() {
        steps.push(NextStep {
            priority: Priority::High,
            action: "Schedule medical consultation".to_string(),
            reason: "Recurring symptoms detected that may require professional evaluation"
                .to_string(),
        });
    }

    if patterns.len() > 3 {
        steps.push(NextStep {
            priority: Priority::Medium,
            action: "Keep detailed symptom diary".to_string(),
            reason: "Multiple patterns detected - detailed tracking will help identify triggers"
                .to_string(),
        });
    }

    steps.push(NextStep {
        priority: Priority::Low,
        action: "Continue monitoring symptoms".to_string(),
        reason: "Regular tracking helps identify patterns and improvements".to_string(),
    });

    steps
}

pub fn generate_overview_insight(entries: &[SymptomEntry]) -> OverviewInsight {
    let time_span = TimeSpan::of(entries);
    OverviewInsight {
        total_entries: entries.len(),
        unique_symptoms: KeywordCounts::from_entries(entries).distinct(),
        time_span,
        average_entries_per_week: entries.len() as f64 / time_span.weeks_denominator(),
    }
}

/// Keywords by count, descending, at most `limit`
pub fn most_common_symptoms(entries: &[SymptomEntry], limit: usize) -> Vec<SymptomCount> {
    KeywordCounts::from_entries(entries)
        .ranked()
        .into_iter()
        .take(limit)
        .map(|(symptom, count)| SymptomCount {
            symptom: symptom.to_string(),
            count,
        })
        .collect()
}
