//! Severity trend analysis
//!
//! Compares mean confidence of the five most recent entries against every
//! entry before them.

use super::types::{SeverityTrend, TrendDirection, Trends};
use crate::journal::SymptomEntry;

/// Size of the "recent" window
pub const RECENT_WINDOW: usize = 5;

/// Entries needed before a trend is attempted
pub const MIN_TREND_ENTRIES: usize = 3;

/// Recent vs. historical confidence. Returns empty `Trends` with fewer
/// than three entries or when every entry falls inside the recent window;
/// that is a normal outcome, not an error.
pub fn analyze_severity_trend(entries: &[SymptomEntry]) -> Trends {
    if entries.len() < MIN_TREND_ENTRIES {
        return Trends::default();
    }

    let mut sorted: Vec<&SymptomEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let (older, recent) = sorted.split_at(sorted.len().saturating_sub(RECENT_WINDOW));
    if older.is_empty() {
        return Trends::default();
    }

    let recent_avg = mean_confidence(recent);
    let older_avg = mean_confidence(older);

    Trends {
        severity: Some(SeverityTrend {
            recent: recent_avg,
            historical: older_avg,
            trend: if recent_avg > older_avg {
                TrendDirection::Increasing
            } else {
                TrendDirection::Decreasing
            },
            change: (recent_avg - older_avg).abs(),
        }),
    }
}

fn mean_confidence(entries: &[&SymptomEntry]) -> f64 {
    entries.iter().map(|e| e.effective_confidence()).sum::<f64>() / entries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(scores: &[Option<f64>]) -> Vec<SymptomEntry> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| {
                let entry =
                    SymptomEntry::new("cough").with_timestamp(base + Duration::days(i as i64));
                match score {
                    Some(s) => entry.confidence(*s),
                    None => entry,
                }
            })
            .collect()
    }

    #[test]
    fn test_fewer_than_three_entries() {
        assert!(analyze_severity_trend(&[]).is_empty());
        assert!(analyze_severity_trend(&series(&[Some(0.9), Some(0.1)])).is_empty());
    }

    #[test]
    fn test_all_entries_in_recent_window() {
        for n in 3..=5 {
            let entries = series(&vec![Some(0.7); n]);
            assert!(analyze_severity_trend(&entries).is_empty(), "n = {}", n);
        }
    }

    #[test]
    fn test_sorted_before_slicing() {
        // oldest -> newest: 0.9 x3 then 0.2 x3, supplied newest-first
        let mut entries = series(&[
            Some(0.9),
            Some(0.9),
            Some(0.9),
            Some(0.2),
            Some(0.2),
            Some(0.2),
        ]);
        entries.reverse();

        let trend = analyze_severity_trend(&entries).severity.unwrap();
        // recent = [0.9, 0.9, 0.2, 0.2, 0.2], historical = [0.9]
        assert!((trend.recent - 0.48).abs() < 1e-9);
        assert!((trend.historical - 0.9).abs() < 1e-9);
        assert_eq!(trend.trend, TrendDirection::Decreasing);
        assert!((trend.change - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_increasing_trend() {
        let entries = series(&[
            Some(0.2),
            Some(0.2),
            Some(0.8),
            Some(0.8),
            Some(0.8),
            Some(0.8),
            Some(0.8),
        ]);
        let trend = analyze_severity_trend(&entries).severity.unwrap();
        assert_eq!(trend.trend, TrendDirection::Increasing);
        assert!((trend.change - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_tie_is_decreasing() {
        let entries = series(&[None; 6]);
        let trend = analyze_severity_trend(&entries).severity.unwrap();
        assert_eq!(trend.recent, 0.5);
        assert_eq!(trend.historical, 0.5);
        assert_eq!(trend.trend, TrendDirection::Decreasing);
        assert_eq!(trend.change, 0.0);
    }

    #[test]
    fn test_missing_confidence_defaults_to_half() {
        let entries = series(&[None, Some(0.5), Some(0.5), Some(0.5), Some(0.5), Some(1.0)]);
        let trend = analyze_severity_trend(&entries).severity.unwrap();
        assert_eq!(trend.historical, 0.5);
        assert!((trend.recent - 0.6).abs() < 1e-9);
    }
}
