//! Temporal pattern detection
//!
//! Entries are bucketed by weekday using the Sunday-first convention
//! (0 = Sunday .. 6 = Saturday). Each timestamp is converted on its own, so
//! a zone with daylight saving puts every entry on its local calendar day.
//! Without an explicit zone the calendar day is taken in UTC.

use super::types::{Pattern, PatternKind};
use crate::journal::SymptomEntry;
use chrono::{Datelike, TimeZone, Utc};

/// Share of entries a single weekday must exceed to count as a pattern
pub const WEEKLY_SHARE_THRESHOLD: f64 = 0.3;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Weekly then monthly patterns, UTC calendar
pub fn analyze_temporal(entries: &[SymptomEntry]) -> Vec<Pattern> {
    analyze_temporal_in(entries, &Utc)
}

/// Weekly then monthly patterns, calendar days taken in `tz`
pub fn analyze_temporal_in<Tz: TimeZone>(entries: &[SymptomEntry], tz: &Tz) -> Vec<Pattern> {
    let mut patterns = analyze_weekly_in(entries, tz);
    patterns.extend(analyze_monthly(entries));
    patterns
}

/// Weekday skew on the UTC calendar
pub fn analyze_weekly(entries: &[SymptomEntry]) -> Vec<Pattern> {
    analyze_weekly_in(entries, &Utc)
}

/// Emit a weekly pattern for each weekday holding more than 30% of the
/// entries. Zero or one entry never produces a pattern.
pub fn analyze_weekly_in<Tz: TimeZone>(entries: &[SymptomEntry], tz: &Tz) -> Vec<Pattern> {
    if entries.len() < 2 {
        return Vec::new();
    }

    let mut buckets = [0usize; 7];
    for entry in entries {
        let day = entry
            .timestamp
            .with_timezone(tz)
            .weekday()
            .num_days_from_sunday();
        buckets[day as usize] += 1;
    }

    let total = entries.len() as f64;
    buckets
        .iter()
        .enumerate()
        .filter_map(|(day, &count)| {
            let share = count as f64 / total;
            (share > WEEKLY_SHARE_THRESHOLD).then(|| Pattern::Temporal {
                day: DAY_NAMES[day].to_string(),
                frequency: share,
                pattern: PatternKind::Weekly,
                description: format!("Symptoms more common on {}", DAY_NAMES[day]),
            })
        })
        .collect()
}

/// Reserved for seasonal analysis. Not yet implemented: always returns an
/// empty list.
pub fn analyze_monthly(_entries: &[SymptomEntry]) -> Vec<Pattern> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime};

    // 2024-01-07 is a Sunday
    fn sunday_plus(days: i64, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 7, hour, 0, 0).unwrap() + chrono::Duration::days(days)
    }

    fn entry(days: i64, hour: u32) -> SymptomEntry {
        SymptomEntry::new("headache").with_timestamp(sunday_plus(days, hour))
    }

    #[test]
    fn test_zero_or_one_entry_is_empty() {
        assert!(analyze_weekly(&[]).is_empty());
        assert!(analyze_weekly(&[entry(0, 10)]).is_empty());
    }

    #[test]
    fn test_weekday_skew_detected() {
        // Mondays x3, Tuesday, Friday
        let entries = vec![entry(1, 9), entry(8, 9), entry(15, 9), entry(2, 9), entry(5, 9)];
        let patterns = analyze_weekly(&entries);

        assert_eq!(patterns.len(), 1);
        match &patterns[0] {
            Pattern::Temporal { day, frequency, pattern, description } => {
                assert_eq!(day, "Monday");
                assert!((frequency - 0.6).abs() < 1e-9);
                assert_eq!(*pattern, PatternKind::Weekly);
                assert_eq!(description, "Symptoms more common on Monday");
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_exactly_thirty_percent_is_not_a_pattern() {
        // 3 of 10 on Sunday, the rest spread one per day or two
        let days = [0, 7, 14, 1, 2, 3, 4, 5, 6, 8];
        let entries: Vec<_> = days.iter().map(|&d| entry(d, 12)).collect();
        let patterns = analyze_weekly(&entries);
        assert!(patterns
            .iter()
            .all(|p| matches!(p, Pattern::Temporal { day, .. } if day != "Sunday")));
    }

    #[test]
    fn test_offset_moves_calendar_day() {
        // 23:00 UTC on Sunday is Monday at +02:00
        let entries = vec![entry(0, 23), entry(7, 23)];
        let utc = analyze_weekly(&entries);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let shifted = analyze_weekly_in(&entries, &plus_two);

        assert!(matches!(&utc[0], Pattern::Temporal { day, .. } if day == "Sunday"));
        assert!(matches!(&shifted[0], Pattern::Temporal { day, .. } if day == "Monday"));
    }

    /// US Eastern for 2024: UTC-4 from 10 March 07:00Z to 3 November 06:00Z,
    /// UTC-5 otherwise
    #[derive(Debug, Clone, Copy)]
    struct Eastern;

    impl Eastern {
        fn offset_at(utc: &NaiveDateTime) -> FixedOffset {
            let dst_start = NaiveDate::from_ymd_opt(2024, 3, 10)
                .and_then(|d| d.and_hms_opt(7, 0, 0))
                .unwrap();
            let dst_end = NaiveDate::from_ymd_opt(2024, 11, 3)
                .and_then(|d| d.and_hms_opt(6, 0, 0))
                .unwrap();
            let hours = if *utc >= dst_start && *utc < dst_end { 4 } else { 5 };
            FixedOffset::west_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for Eastern {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            Eastern
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_at(local))
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_at(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at(utc)
        }
    }

    fn weekdays<Tz: TimeZone>(entries: &[SymptomEntry], tz: &Tz) -> Vec<String> {
        analyze_weekly_in(entries, tz)
            .into_iter()
            .filter_map(|p| match p {
                Pattern::Temporal { day, .. } => Some(day),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_each_entry_uses_its_own_daylight_saving_offset() {
        // Sunday 23:30 local in winter (EST) and in summer (EDT)
        let winter = Utc.with_ymd_and_hms(2024, 1, 8, 4, 30, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 8, 3, 30, 0).unwrap();
        let mut entries: Vec<_> = (0..3)
            .map(|week| {
                SymptomEntry::new("headache")
                    .with_timestamp(winter + chrono::Duration::weeks(week))
            })
            .collect();
        entries.push(SymptomEntry::new("headache").with_timestamp(summer));

        assert_eq!(weekdays(&entries, &Eastern), vec!["Sunday"]);

        // A single summer offset pushes the winter entries past midnight
        let summer_offset = Eastern.offset_from_utc_datetime(&summer.naive_utc());
        assert_eq!(summer_offset, FixedOffset::west_opt(4 * 3600).unwrap());
        assert_eq!(weekdays(&entries, &summer_offset), vec!["Monday"]);
    }

    #[test]
    fn test_days_reported_in_week_order() {
        let entries = vec![entry(6, 9), entry(13, 9), entry(0, 9), entry(7, 9)];
        let days: Vec<_> = analyze_weekly(&entries)
            .into_iter()
            .filter_map(|p| match p {
                Pattern::Temporal { day, .. } => Some(day),
                _ => None,
            })
            .collect();
        assert_eq!(days, vec!["Sunday", "Saturday"]);
    }

    #[test]
    fn test_monthly_is_reserved() {
        let entries: Vec<_> = (0..40).map(|d| entry(d, 9)).collect();
        assert!(analyze_monthly(&entries).is_empty());
    }

    #[test]
    fn test_input_is_not_reordered() {
        let entries = vec![entry(3, 9), entry(0, 9), entry(1, 9)];
        let before: Vec<_> = entries.iter().map(|e| e.timestamp).collect();
        let _ = analyze_temporal(&entries);
        let after: Vec<_> = entries.iter().map(|e| e.timestamp).collect();
        assert_eq!(before, after);
    }
}
