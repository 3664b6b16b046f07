//! Frequency pattern detection

use super::keywords::KeywordCounts;
use super::types::{Pattern, PatternKind};
use crate::journal::SymptomEntry;

/// Minimum count before a keyword becomes a pattern
pub const MIN_PATTERN_COUNT: usize = 3;

/// Count at which a pattern is classed as high frequency
pub const HIGH_FREQUENCY_COUNT: usize = 5;

/// Emit a frequency pattern for each keyword mentioned in at least three
/// entries, in first-seen order. Empty input yields an empty list.
pub fn analyze_frequency(entries: &[SymptomEntry]) -> Vec<Pattern> {
    frequency_patterns(&KeywordCounts::from_entries(entries))
}

pub(crate) fn frequency_patterns(counts: &KeywordCounts) -> Vec<Pattern> {
    counts
        .iter()
        .filter(|(_, count)| *count >= MIN_PATTERN_COUNT)
        .map(|(symptom, count)| Pattern::Frequency {
            symptom: symptom.to_string(),
            count,
            pattern: if count >= HIGH_FREQUENCY_COUNT {
                PatternKind::HighFrequency
            } else {
                PatternKind::ModerateFrequency
            },
            description: format!("{} reported {} times", symptom, count),
        })
        .collect()
}
