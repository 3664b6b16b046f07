//! Health insights
//!
//! Combines the rule-based engine with one batch call to the symptom
//! assistant.

use crate::analysis::{
    analyze_frequency, analyze_severity_trend, analyze_temporal_in, generate_alerts,
    generate_next_steps, generate_overview_insight, generate_trend_insights,
    identify_chronic_indicators, HealthAlert, NextStep, OverviewInsight, TrendInsight,
};
use crate::assistant::{RecommendationDraft, SymptomAssistant, RECOMMENDATION_WINDOW};
use crate::journal::SymptomEntry;
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
    pub overview: OverviewInsight,
    pub trends: Vec<TrendInsight>,
    pub recommendations: Vec<RecommendationDraft>,
    pub alerts: Vec<HealthAlert>,
    pub next_steps: Vec<NextStep>,
}

/// Overview, trend insights, assistant recommendations for the ten most
/// recent entries, alerts and next steps.
///
/// Weekday patterns are taken on the calendar of `tz`, the same one the
/// pattern analysis is given. The assistant is awaited exactly once. Its
/// failure handling is its own.
pub async fn generate_health_insights<Tz: TimeZone>(
    entries: &[SymptomEntry],
    assistant: &dyn SymptomAssistant,
    tz: &Tz,
) -> HealthInsights {
    let mut patterns = analyze_frequency(entries);
    patterns.extend(analyze_temporal_in(entries, tz));
    let trends = analyze_severity_trend(entries);
    let indicators = identify_chronic_indicators(entries);

    let mut recent: Vec<SymptomEntry> = entries.to_vec();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(RECOMMENDATION_WINDOW);
    let recommendations = assistant.recommend(&recent).await;

    tracing::debug!(
        entries = entries.len(),
        indicators = indicators.len(),
        recommendations = recommendations.len(),
        "Generated health insights"
    );

    HealthInsights {
        overview: generate_overview_insight(entries),
        trends: generate_trend_insights(&trends),
        recommendations,
        alerts: generate_alerts(&indicators),
        next_steps: generate_next_steps(&patterns, &indicators),
    }
}
