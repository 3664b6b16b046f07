//! Dashboard signals
//!
//! Lightweight figures shown next to the full analysis. These use their own
//! crude term extraction and a smaller vocabulary than `analysis`, so the
//! two can disagree on what counts as a symptom.

use crate::journal::{FreeText, SymptomEntry};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Entries considered by [`recurring_terms`]
const RECURRING_WINDOW: usize = 10;
const RECURRING_MIN_COUNT: usize = 2;
const RECURRING_LIMIT: usize = 3;

/// Free-text words must be longer than this to count as a term
const MIN_TERM_LEN: usize = 3;

const CHART_VOCABULARY: [&str; 12] = [
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
];
const CHART_LIMIT: usize = 8;

const ACTIVITY_DAYS: usize = 14;
const RECENT_DAYS: usize = 3;
/// Percent change of mean daily counts treated as flat
const STABLE_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_entries: usize,
    pub entries_this_week: usize,
    pub total_recommendations: usize,
}

impl DashboardSummary {
    /// "This week" is anything strictly after `now - 7 days`
    pub fn at(entries: &[SymptomEntry], total_recommendations: usize, now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        Self {
            total_entries: entries.len(),
            entries_this_week: entries.iter().filter(|e| e.timestamp > week_ago).count(),
            total_recommendations,
        }
    }

    pub fn now(entries: &[SymptomEntry], total_recommendations: usize) -> Self {
        Self::at(entries, total_recommendations, Utc::now())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringTerm {
    pub symptom: String,
    pub frequency: usize,
    pub trend: String,
}

/// Terms seen at least twice across the ten most recent entries, top three.
/// `None` when there are fewer than two entries.
pub fn recurring_terms(entries: &[SymptomEntry]) -> Option<Vec<RecurringTerm>> {
    if entries.len() < 2 {
        return None;
    }

    let mut recent: Vec<&SymptomEntry> = entries.iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in recent.into_iter().take(RECURRING_WINDOW) {
        for term in raw_terms(&entry.symptoms) {
            let count = counts.entry(term.clone()).or_insert(0);
            if *count == 0 {
                order.push(term);
            }
            *count += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|term| {
            let count = counts[&term];
            (term, count)
        })
        .filter(|(_, count)| *count >= RECURRING_MIN_COUNT)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Some(
        ranked
            .into_iter()
            .take(RECURRING_LIMIT)
            .map(|(symptom, frequency)| RecurringTerm {
                symptom,
                frequency,
                trend: "recurring".to_string(),
            })
            .collect(),
    )
}

fn raw_terms(symptoms: &FreeText) -> Vec<String> {
    match symptoms {
        FreeText::List(labels) => labels.iter().map(|l| l.to_lowercase()).collect(),
        FreeText::Text(text) => text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| word.chars().count() > MIN_TERM_LEN)
            .map(|word| word.to_lowercase())
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomFrequency {
    pub symptom: String,
    pub count: usize,
    /// Share of all entries, 0 to 100
    pub percentage: f64,
}

/// Chart data over the dashboard vocabulary, top eight by count
pub fn symptom_frequency(entries: &[SymptomEntry]) -> Vec<SymptomFrequency> {
    if entries.is_empty() {
        return Vec::new();
    }

    let texts: Vec<String> = entries.iter().map(|e| e.symptom_text().to_lowercase()).collect();
    let mut rows: Vec<SymptomFrequency> = CHART_VOCABULARY
        .iter()
        .filter_map(|term| {
            let count = texts.iter().filter(|t| t.contains(term)).count();
            (count > 0).then(|| SymptomFrequency {
                symptom: capitalize(term),
                count,
                percentage: count as f64 / entries.len() as f64 * 100.0,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(CHART_LIMIT);
    rows
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
    pub avg_confidence: f64,
}

/// Per-day entry counts on the UTC calendar, oldest first, limited to the
/// last fourteen days that have entries.
pub fn daily_activity(entries: &[SymptomEntry]) -> Vec<DailyActivity> {
    let mut by_day: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
    for entry in entries {
        let slot = by_day.entry(entry.timestamp.date_naive()).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += entry.effective_confidence();
    }

    let skip = by_day.len().saturating_sub(ACTIVITY_DAYS);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, (count, total))| DailyActivity {
            date,
            count,
            avg_confidence: total / count as f64,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for ActivityDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityDirection::Increasing => write!(f, "increasing"),
            ActivityDirection::Decreasing => write!(f, "decreasing"),
            ActivityDirection::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ActivityTrend {
    pub direction: ActivityDirection,
    /// Absolute percent change of the mean daily count
    pub change: f64,
}

impl ActivityTrend {
    fn stable() -> Self {
        Self {
            direction: ActivityDirection::Stable,
            change: 0.0,
        }
    }
}

/// Compare the mean count of the last three days against the days before
pub fn activity_trend(days: &[DailyActivity]) -> ActivityTrend {
    if days.len() < 2 {
        return ActivityTrend::stable();
    }

    let split = days.len().saturating_sub(RECENT_DAYS);
    let (older, recent) = days.split_at(split);
    if older.is_empty() {
        return ActivityTrend::stable();
    }

    let mean = |slice: &[DailyActivity]| {
        slice.iter().map(|d| d.count as f64).sum::<f64>() / slice.len() as f64
    };
    let older_avg = mean(older);
    let change = (mean(recent) - older_avg) / older_avg * 100.0;

    let direction = if change > STABLE_BAND {
        ActivityDirection::Increasing
    } else if change < -STABLE_BAND {
        ActivityDirection::Decreasing
    } else {
        ActivityDirection::Stable
    };

    ActivityTrend {
        direction,
        change: change.abs(),
    }
}

/// Everything the dashboard shows, in one value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub recurring: Option<Vec<RecurringTerm>>,
    pub symptom_frequency: Vec<SymptomFrequency>,
    pub daily_activity: Vec<DailyActivity>,
    pub activity_trend: ActivityTrend,
}

pub fn build_dashboard(
    entries: &[SymptomEntry],
    total_recommendations: usize,
    now: DateTime<Utc>,
) -> Dashboard {
    let daily = daily_activity(entries);
    Dashboard {
        summary: DashboardSummary::at(entries, total_recommendations, now),
        recurring: recurring_terms(entries),
        symptom_frequency: symptom_frequency(entries),
        activity_trend: activity_trend(&daily),
        daily_activity: daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn on(text: &str, day: i64) -> SymptomEntry {
        SymptomEntry::new(text).with_timestamp(base() + Duration::days(day))
    }

    fn activity(counts: &[usize]) -> Vec<DailyActivity> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DailyActivity {
                date: base().date_naive() + Duration::days(i as i64),
                count,
                avg_confidence: 0.5,
            })
            .collect()
    }

    #[test]
    fn test_summary_this_week() {
        let entries = vec![on("a", 0), on("b", -6), on("c", -7), on("d", -30)];
        let summary = DashboardSummary::at(&entries, 4, base());

        assert_eq!(summary.total_entries, 4);
        // exactly seven days ago is excluded
        assert_eq!(summary.entries_this_week, 2);
        assert_eq!(summary.total_recommendations, 4);
    }

    #[test]
    fn test_recurring_terms() {
        assert_eq!(recurring_terms(&[on("headache", 0)]), None);

        let entries = vec![
            on("Headache and nausea", 0),
            on("headache", 1),
            SymptomEntry::new(vec!["Nausea".to_string(), "Fever".to_string()])
                .with_timestamp(base() + Duration::days(2)),
            on("mild fever", 3),
        ];
        let terms = recurring_terms(&entries).unwrap();
        let names: Vec<_> = terms.iter().map(|t| t.symptom.as_str()).collect();

        assert_eq!(terms.len(), 3);
        assert!(names.contains(&"headache"));
        assert!(names.contains(&"nausea"));
        assert!(names.contains(&"fever"));
        assert!(terms.iter().all(|t| t.frequency == 2 && t.trend == "recurring"));
    }

    #[test]
    fn test_recurring_terms_only_recent_ten() {
        let mut entries: Vec<_> = (0..10).map(|d| on("cough", d)).collect();
        entries.push(on("rash", -5));
        entries.push(on("rash", -4));

        let terms = recurring_terms(&entries).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].symptom, "cough");
        assert_eq!(terms[0].frequency, 10);
    }

    #[test]
    fn test_symptom_frequency_chart() {
        let entries = vec![
            on("Joint pain", 0),
            on("headache", 1),
            on("headache, fever", 2),
            on("ok", 3),
        ];
        let chart = symptom_frequency(&entries);

        assert_eq!(chart[0].symptom, "Headache");
        assert_eq!(chart[0].count, 2);
        assert_eq!(chart[0].percentage, 50.0);
        assert!(chart.iter().any(|r| r.symptom == "Joint pain"));
        assert!(chart.iter().any(|r| r.symptom == "Pain"));
        assert!(symptom_frequency(&[]).is_empty());
    }

    #[test]
    fn test_daily_activity_buckets() {
        let entries = vec![
            on("a", 0).confidence(0.2),
            on("b", 0).confidence(0.6),
            on("c", 1),
        ];
        let days = daily_activity(&entries);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].count, 2);
        assert!((days[0].avg_confidence - 0.4).abs() < 1e-9);
        assert_eq!(days[1].avg_confidence, 0.5);
    }

    #[test]
    fn test_daily_activity_keeps_last_fourteen() {
        let entries: Vec<_> = (0..20).map(|d| on("x", d)).collect();
        let days = daily_activity(&entries);

        assert_eq!(days.len(), 14);
        assert_eq!(days[0].date, (base() + Duration::days(6)).date_naive());
    }

    #[test]
    fn test_activity_trend() {
        assert_eq!(activity_trend(&activity(&[1])), ActivityTrend::stable());
        assert_eq!(activity_trend(&activity(&[1, 2, 3])), ActivityTrend::stable());

        let rising = activity_trend(&activity(&[1, 1, 2, 2, 2]));
        assert_eq!(rising.direction, ActivityDirection::Increasing);
        assert_eq!(rising.change, 100.0);

        let falling = activity_trend(&activity(&[4, 2, 2, 2]));
        assert_eq!(falling.direction, ActivityDirection::Decreasing);
        assert_eq!(falling.change, 50.0);

        let flat = activity_trend(&activity(&[20, 21, 20, 20]));
        assert_eq!(flat.direction, ActivityDirection::Stable);
    }
}
