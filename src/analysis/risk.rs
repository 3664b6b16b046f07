//! Risk scoring
//!
//! Fixed linear rule:
//! `2 * high_frequency patterns + 3 * increasing trend + 2 * warning insights`,
//! then `>= 6` is high and `>= 3` is moderate.

use super::types::{
    Insight, InsightSeverity, Pattern, PatternSummary, RiskFactor, RiskFactorKind, RiskLevel,
    Trends,
};

const HIGH_FREQUENCY_WEIGHT: u32 = 2;
const INCREASING_TREND_WEIGHT: u32 = 3;
const WARNING_INSIGHT_WEIGHT: u32 = 2;

const HIGH_RISK_SCORE: u32 = 6;
const MODERATE_RISK_SCORE: u32 = 3;

/// Raw score behind [`score_risk`]
pub fn risk_score(patterns: &[Pattern], trends: &Trends, insights: &[Insight]) -> u32 {
    let high_frequency = patterns.iter().filter(|p| p.is_high_frequency()).count() as u32;
    let warnings = insights
        .iter()
        .filter(|i| i.severity == InsightSeverity::Warning)
        .count() as u32;

    let mut score = high_frequency * HIGH_FREQUENCY_WEIGHT + warnings * WARNING_INSIGHT_WEIGHT;
    if trends.is_increasing() {
        score += INCREASING_TREND_WEIGHT;
    }
    score
}

pub fn score_risk(patterns: &[Pattern], trends: &Trends, insights: &[Insight]) -> RiskLevel {
    match risk_score(patterns, trends, insights) {
        s if s >= HIGH_RISK_SCORE => RiskLevel::High,
        s if s >= MODERATE_RISK_SCORE => RiskLevel::Moderate,
        _ => RiskLevel::Low,
    }
}

/// A single frequency risk factor when any pattern is high frequency
pub fn identify_risk_factors(patterns: &[Pattern]) -> Vec<RiskFactor> {
    if !patterns.iter().any(|p| p.is_high_frequency()) {
        return Vec::new();
    }

    vec![RiskFactor {
        kind: RiskFactorKind::Frequency,
        factor: "High symptom frequency".to_string(),
        description: "Multiple symptoms reported frequently may indicate an underlying condition"
            .to_string(),
        severity: RiskLevel::Moderate,
    }]
}

pub fn summarize(patterns: &[Pattern], trends: &Trends, insights: &[Insight]) -> PatternSummary {
    PatternSummary {
        total_patterns: patterns.len(),
        significant_trends: trends.len(),
        key_insights: insights.len(),
        overall_risk: score_risk(patterns, trends, insights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{InsightKind, PatternKind, SeverityTrend, TrendDirection};

    fn frequency(count: usize, kind: PatternKind) -> Pattern {
        Pattern::Frequency {
            symptom: format!("s{}", count),
            count,
            pattern: kind,
            description: String::new(),
        }
    }

    fn high(n: usize) -> Vec<Pattern> {
        (0..n).map(|i| frequency(5 + i, PatternKind::HighFrequency)).collect()
    }

    fn trend(direction: TrendDirection) -> Trends {
        Trends {
            severity: Some(SeverityTrend {
                recent: 0.6,
                historical: 0.4,
                trend: direction,
                change: 0.2,
            }),
        }
    }

    fn warning() -> Insight {
        Insight {
            kind: InsightKind::Trend,
            title: "t".to_string(),
            description: "d".to_string(),
            severity: InsightSeverity::Warning,
        }
    }

    #[test]
    fn test_empty_is_low() {
        assert_eq!(score_risk(&[], &Trends::default(), &[]), RiskLevel::Low);
    }

    #[test]
    fn test_exact_weights_and_thresholds() {
        let none = Trends::default();
        assert_eq!(risk_score(&high(1), &none, &[]), 2);
        assert_eq!(score_risk(&high(1), &none, &[]), RiskLevel::Low);

        assert_eq!(risk_score(&[], &trend(TrendDirection::Increasing), &[]), 3);
        assert_eq!(
            score_risk(&[], &trend(TrendDirection::Increasing), &[]),
            RiskLevel::Moderate
        );

        assert_eq!(risk_score(&high(3), &none, &[]), 6);
        assert_eq!(score_risk(&high(3), &none, &[]), RiskLevel::High);

        assert_eq!(risk_score(&high(1), &none, &[warning(), warning()]), 6);
        assert_eq!(risk_score(&[], &trend(TrendDirection::Decreasing), &[]), 0);
    }

    #[test]
    fn test_moderate_patterns_do_not_score() {
        let patterns = vec![frequency(3, PatternKind::ModerateFrequency); 4];
        assert_eq!(risk_score(&patterns, &Trends::default(), &[]), 0);
    }

    #[test]
    fn test_monotonic_in_high_frequency_and_trend() {
        let insights = [warning()];
        for trends in [Trends::default(), trend(TrendDirection::Increasing)] {
            let mut previous = RiskLevel::Low;
            for n in 0..6 {
                let level = score_risk(&high(n), &trends, &insights);
                assert!(level >= previous);
                previous = level;
            }
        }

        for n in 0..6 {
            let flat = score_risk(&high(n), &trend(TrendDirection::Decreasing), &insights);
            let rising = score_risk(&high(n), &trend(TrendDirection::Increasing), &insights);
            assert!(rising >= flat);
        }
    }

    #[test]
    fn test_risk_factor_only_for_high_frequency() {
        assert!(identify_risk_factors(&[frequency(3, PatternKind::ModerateFrequency)]).is_empty());

        let factors = identify_risk_factors(&high(2));
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor, "High symptom frequency");
        assert_eq!(factors[0].severity, RiskLevel::Moderate);
    }

    #[test]
    fn test_summary_counts() {
        let summary = summarize(&high(1), &trend(TrendDirection::Increasing), &[warning()]);
        assert_eq!(summary.total_patterns, 1);
        assert_eq!(summary.significant_trends, 1);
        assert_eq!(summary.key_insights, 1);
        assert_eq!(summary.overall_risk, RiskLevel::High);
    }
}
