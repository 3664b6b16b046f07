//! CSV Import
//!
//! Reads the `Date,Symptoms,Confidence,Diagnosis` export back into journal
//! entries. Bad rows are collected, not fatal.

use super::StoreResult;
use crate::journal::SymptomEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::path::Path;

const DATE_COLUMN: usize = 0;
const SYMPTOMS_COLUMN: usize = 1;
const CONFIDENCE_COLUMN: usize = 2;
const DIAGNOSIS_COLUMN: usize = 3;

/// Row errors kept before the rest are summarised
const MAX_ERRORS: usize = 100;

/// Result of a CSV import operation
#[derive(Debug)]
pub struct CsvImportResult {
    pub entries: Vec<SymptomEntry>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

/// Import from a CSV string
pub fn import_csv_str(csv_data: &str) -> StoreResult<CsvImportResult> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    Ok(import_records(reader))
}

/// Import from a CSV file
pub fn import_csv_path(path: &Path) -> StoreResult<CsvImportResult> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let result = import_records(reader);

    tracing::info!(
        path = ?path,
        processed = result.rows_processed,
        failed = result.rows_failed,
        "Imported CSV"
    );
    Ok(result)
}

fn import_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> CsvImportResult {
    let mut entries = Vec::new();
    let mut rows_failed = 0;
    let mut errors = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        // header is line 1
        let actual_line = line_num + 2;

        match result
            .map_err(|e| e.to_string())
            .and_then(|record| parse_record(&record))
        {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                errors.push(format!("Line {}: {}", actual_line, e));
                rows_failed += 1;
            }
        }
    }

    if errors.len() > MAX_ERRORS {
        let total = errors.len();
        errors.truncate(MAX_ERRORS);
        errors.push(format!("... and {} more errors", total - MAX_ERRORS));
    }

    CsvImportResult {
        rows_processed: entries.len(),
        entries,
        rows_failed,
        errors,
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<SymptomEntry, String> {
    let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default();

    let date = field(DATE_COLUMN);
    if date.is_empty() {
        return Err("missing date".to_string());
    }
    let timestamp = parse_timestamp(date)?;

    let symptoms = field(SYMPTOMS_COLUMN);
    if symptoms.is_empty() {
        return Err("missing symptoms".to_string());
    }

    let mut entry = SymptomEntry::new(symptoms).with_timestamp(timestamp);

    let confidence = field(CONFIDENCE_COLUMN);
    if !confidence.is_empty() {
        let score = confidence
            .parse::<f64>()
            .map_err(|_| format!("invalid confidence: {}", confidence))?;
        entry = entry.confidence(score);
    }

    let diagnosis = field(DIAGNOSIS_COLUMN);
    if !diagnosis.is_empty() {
        entry = entry.diagnosis(diagnosis);
    }

    Ok(entry)
}

/// RFC 3339 first, then common date-time and date-only layouts (UTC,
/// dates at noon).
fn parse_timestamp(ts_str: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts_str) {
        return Ok(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts_str, fmt) {
            return Ok(dt.and_utc());
        }
    }

    let date_formats = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Some(dt) = NaiveDate::parse_from_str(ts_str, fmt)
            .ok()
            .and_then(|date| date.and_hms_opt(12, 0, 0))
        {
            return Ok(dt.and_utc());
        }
    }

    Err(format!("Could not parse timestamp: {}", ts_str))
}
