//! Keyword extraction
//!
//! Maps free-text symptom descriptions onto a fixed vocabulary by plain
//! case-insensitive substring search. Overlapping terms both match, so
//! "chest pain" also yields "pain".

use crate::journal::SymptomEntry;

/// Canonical symptom vocabulary, in match order
pub const SYMPTOM_VOCABULARY: [&str; 21] = [
    "headache",
    "fever",
    "cough",
    "fatigue",
    "nausea",
    "dizziness",
    "pain",
    "sore throat",
    "runny nose",
    "congestion",
    "muscle ache",
    "joint pain",
    "stomach ache",
    "diarrhea",
    "constipation",
    "insomnia",
    "anxiety",
    "depression",
    "shortness of breath",
    "chest pain",
    "back pain",
];

/// Canonical keywords present in `text`, distinct and in vocabulary order.
/// Empty when nothing matches.
pub fn extract_keywords(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    SYMPTOM_VOCABULARY
        .iter()
        .copied()
        .filter(|term| text.contains(term))
        .collect()
}

/// Per-keyword entry counts, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    counts: Vec<(&'static str, usize)>,
}

impl KeywordCounts {
    /// Count, for each keyword, how many entries mention it
    pub fn from_entries(entries: &[SymptomEntry]) -> Self {
        let mut counts = Self::default();
        for entry in entries {
            for keyword in extract_keywords(&entry.symptom_text()) {
                counts.bump(keyword);
            }
        }
        counts
    }

    fn bump(&mut self, keyword: &'static str) {
        match self.counts.iter_mut().find(|(k, _)| *k == keyword) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((keyword, 1)),
        }
    }

    pub fn get(&self, keyword: &str) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Number of distinct keywords seen
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Sorted by count descending; ties keep first-seen order
    pub fn ranked(&self) -> Vec<(&'static str, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}
