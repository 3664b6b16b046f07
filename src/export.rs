//! Health data export
//!
//! Formats a journal snapshot for backup and sharing:
//! - JSON: entries, recommendations, summary and the full pattern analysis
//! - CSV: one row per entry (`Date,Symptoms,Confidence,Diagnosis`)
//!
//! Pure formatting; writing the result anywhere is the caller's job.

use crate::analysis::{
    analyze_symptom_patterns_in, most_common_symptoms, PatternAnalysis, SymptomCount,
};
use crate::journal::{DateRange, FreeText, Recommendation, RecommendationType, SymptomEntry};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Number of keywords listed in the export summary
const SUMMARY_SYMPTOM_LIMIT: usize = 5;

pub const CSV_HEADER: &str = "Date,Symptoms,Confidence,Diagnosis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Full export snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthExport {
    pub export_date: String,
    pub summary: ExportSummary,
    pub symptom_entries: Vec<ExportedEntry>,
    pub recommendations: Vec<ExportedRecommendation>,
    pub patterns: PatternAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_entries: usize,
    pub date_range: Option<DateRange>,
    pub most_common_symptoms: Vec<SymptomCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedEntry {
    pub date: String,
    pub symptoms: FreeText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<FreeText>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedRecommendation {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub recommendation: String,
}

/// Assemble the snapshot, stamped with `now`. Weekday patterns are taken
/// on the calendar of `tz`; timestamps are always written in UTC.
pub fn build_export<Tz: TimeZone>(
    entries: &[SymptomEntry],
    recommendations: &[Recommendation],
    now: DateTime<Utc>,
    tz: &Tz,
) -> HealthExport {
    HealthExport {
        export_date: iso_timestamp(now),
        summary: ExportSummary {
            total_entries: entries.len(),
            date_range: DateRange::of(entries),
            most_common_symptoms: most_common_symptoms(entries, SUMMARY_SYMPTOM_LIMIT),
        },
        symptom_entries: entries
            .iter()
            .map(|entry| ExportedEntry {
                date: iso_timestamp(entry.timestamp),
                symptoms: entry.symptoms.clone(),
                confidence: entry.confidence_score,
                diagnosis: entry.potential_diagnosis.clone(),
            })
            .collect(),
        recommendations: recommendations
            .iter()
            .map(|rec| ExportedRecommendation {
                date: iso_timestamp(rec.timestamp),
                kind: rec.kind.clone(),
                recommendation: rec.recommendation_text.clone(),
            })
            .collect(),
        patterns: analyze_symptom_patterns_in(entries, tz),
    }
}

/// Export stamped with the current time
pub fn export_health_data<Tz: TimeZone>(
    entries: &[SymptomEntry],
    recommendations: &[Recommendation],
    format: ExportFormat,
    tz: &Tz,
) -> Result<String, ExportError> {
    export_health_data_at(entries, recommendations, format, Utc::now(), tz)
}

pub fn export_health_data_at<Tz: TimeZone>(
    entries: &[SymptomEntry],
    recommendations: &[Recommendation],
    format: ExportFormat,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<String, ExportError> {
    let export = build_export(entries, recommendations, now, tz);

    match format {
        ExportFormat::Csv => Ok(format_csv(&export.symptom_entries)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&export)?),
    }
}

/// Header plus one line per entry; symptom and diagnosis are quoted.
/// Rows are joined with `\n` without a trailing newline.
pub fn format_csv(entries: &[ExportedEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for entry in entries {
        lines.push(format!(
            "{},\"{}\",{},\"{}\"",
            entry.date,
            escape_quotes(&entry.symptoms.as_text()),
            entry.confidence.map(|c| c.to_string()).unwrap_or_default(),
            escape_quotes(
                &entry
                    .diagnosis
                    .as_ref()
                    .map(|d| d.as_text())
                    .unwrap_or_default()
            ),
        ));
    }

    lines.join("\n")
}

fn escape_quotes(field: &str) -> String {
    field.replace('"', "\"\"")
}

pub(crate) fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown export format: {0} (expected json or csv)")]
    UnknownFormat(String),
}
