//! Chronic condition indicators

use super::keywords::KeywordCounts;
use super::types::{ChronicIndicator, IndicatorKind, RiskLevel};
use crate::journal::{SymptomEntry, TimeSpan};

/// Occurrences per week at which a keyword counts as recurring
pub const RECURRING_PER_WEEK: f64 = 0.5;

/// Minimum total occurrences for a recurring keyword
pub const MIN_OCCURRENCES: usize = 3;

/// Flag keywords reported at least three times and at least every other
/// week on average. The week count is `ceil(days / 7)` floored to one.
pub fn identify_chronic_indicators(entries: &[SymptomEntry]) -> Vec<ChronicIndicator> {
    if entries.is_empty() {
        return Vec::new();
    }

    let weeks = TimeSpan::of(entries).weeks_denominator();
    let counts = KeywordCounts::from_entries(entries);

    let mut indicators: Vec<ChronicIndicator> = counts
        .iter()
        .filter_map(|(symptom, occurrences)| {
            let frequency = occurrences as f64 / weeks;
            (frequency >= RECURRING_PER_WEEK && occurrences >= MIN_OCCURRENCES).then(|| {
                ChronicIndicator {
                    kind: IndicatorKind::RecurringSymptom,
                    symptom: symptom.to_string(),
                    frequency,
                    occurrences,
                    severity: RiskLevel::Moderate,
                    recommendation: format!(
                        "Consider discussing recurring {} with a healthcare provider",
                        symptom
                    ),
                }
            })
        })
        .collect();

    indicators.extend(identify_symptom_clusters(entries));
    indicators
}

/// Reserved for symptom clustering. Not yet implemented: always returns an
/// empty list.
pub fn identify_symptom_clusters(_entries: &[SymptomEntry]) -> Vec<ChronicIndicator> {
    Vec::new()
}
