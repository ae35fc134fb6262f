//! CSV ingestion with a row-error ledger.
//!
//! Partial success is the norm here: a row that fails column mapping or
//! schema validation is recorded and skipped, never aborts the batch. Only
//! a missing or unreadable file is fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bookdir_core::{validate_row, BookstoreRecord, RawRow};
use serde::Serialize;

use crate::columns::map_row;
use crate::error::IngestError;

/// One skipped row, with enough context to fix the source data.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// 1-based physical data row number (the header row is not counted).
    /// Blank rows consume a number too, so this lines up with the source
    /// file.
    pub row: usize,
    pub message: String,
    /// The mapped row as it looked when it failed, preserved for debugging.
    pub raw: RawRow,
}

/// Everything a build gets out of one CSV file.
///
/// Invariant: `records.len() + errors.len()` equals the number of non-blank
/// data rows consumed.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<BookstoreRecord>,
    pub errors: Vec<RowError>,
}

/// Ingest the bookstore CSV at `path`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] when the file cannot be opened and
/// [`IngestError::Csv`] when the header row is unreadable. Row-level
/// problems are collected in the report, not returned.
pub fn ingest_csv(path: &Path) -> Result<IngestReport, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_reader(file)
}

/// Ingest from any byte source. Used directly by tests with inline CSV.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] when the header row is unreadable.
pub fn ingest_reader<R: Read>(source: R) -> Result<IngestReport, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut report = IngestReport::default();
    let mut row_number = 0usize;

    for result in reader.records() {
        row_number += 1;
        let record = match result {
            Ok(record) => record,
            // A structurally broken line (bad quoting, truncation) costs
            // that row, not the batch.
            Err(e) => {
                tracing::warn!(row = row_number, error = %e, "skipping unreadable CSV row");
                report.errors.push(RowError {
                    row: row_number,
                    message: e.to_string(),
                    raw: RawRow::new(),
                });
                continue;
            }
        };

        if record.iter().all(|field| field.trim().is_empty()) {
            // Blank row: neither a record nor an error, but it keeps its
            // row number so later errors line up with the source file.
            continue;
        }

        let mapped = map_row(&headers, &record);
        match validate_row(&mapped) {
            Ok(validated) => report.records.push(validated),
            Err(e) => {
                tracing::warn!(row = row_number, error = %e, "skipping invalid row");
                report.errors.push(RowError {
                    row: row_number,
                    message: e.to_string(),
                    raw: mapped,
                });
            }
        }
    }

    tracing::info!(
        records = report.records.len(),
        errors = report.errors.len(),
        "CSV ingest complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,full_address,city,state,postal_code,latitude,longitude,place_id,site,rating,reviews,working_hours";

    fn ingest(body: &str) -> IngestReport {
        let csv = format!("{HEADER}\n{body}");
        ingest_reader(csv.as_bytes()).unwrap()
    }

    fn good_row(name: &str, state: &str) -> String {
        format!(
            "{name},123 Queen St W,Toronto,{state},M6J 1G1,43.6465,-79.4198,ChIJ{name},https://example.ca,4.5,120,Saturday: 10:00-17:00"
        )
    }

    // -----------------------------------------------------------------------
    // row accounting
    // -----------------------------------------------------------------------

    #[test]
    fn every_row_is_accounted_for_exactly_once() {
        let body = format!(
            "{}\n{}\n{}",
            good_row("Bellwoods Books", "ON"),
            ",,,,,,,,,,,", // every field empty → treated as a blank line
            good_row("Type Books", "Ontario"),
        );
        let report = ingest(&body);
        assert_eq!(report.records.len() + report.errors.len(), 2);
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn invalid_row_lands_in_error_ledger_not_records() {
        let body = format!(
            "{}\n{}",
            good_row("Bellwoods Books", "ON"),
            "No Coordinates Books,456 Main St,Hamilton,ON,L8N 1A1,,,ChIJx,,,,"
        );
        let report = ingest(&body);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.errors.len(), 1);
        let err = &report.errors[0];
        assert_eq!(err.row, 2);
        assert!(err.message.contains("latitude"));
        assert!(err.message.contains("longitude"));
        assert_eq!(
            err.raw.get("name").map(String::as_str),
            Some("No Coordinates Books")
        );
    }

    #[test]
    fn row_numbers_are_one_based_data_rows() {
        let body = format!("{}\nonly-a-name,,,,,,,,,,,", good_row("Bellwoods Books", "ON"));
        let report = ingest(&body);
        assert_eq!(report.errors[0].row, 2);
    }

    #[test]
    fn blank_rows_keep_row_numbers_aligned_with_the_file() {
        let body = format!(
            "{}\n{}\nonly-a-name,,,,,,,,,,,",
            good_row("Bellwoods Books", "ON"),
            ",,,,,,,,,,,",
        );
        let report = ingest(&body);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.errors.len(), 1);
        // The blank second row consumed a number, so the bad row reports
        // its physical position in the file.
        assert_eq!(report.errors[0].row, 3);
    }

    // -----------------------------------------------------------------------
    // mapping into records
    // -----------------------------------------------------------------------

    #[test]
    fn validated_record_carries_mapped_fields() {
        let report = ingest(&good_row("Bellwoods Books", "ON"));
        let record = &report.records[0];
        assert_eq!(record.name, "Bellwoods Books");
        assert_eq!(record.province, "ON");
        assert_eq!(record.website.as_deref(), Some("https://example.ca"));
        assert_eq!(record.rating.as_deref(), Some("4.5"));
        assert_eq!(record.review_count.as_deref(), Some("120"));
        assert_eq!(record.hours.saturday.as_deref(), Some("10:00-17:00"));
        assert!(record.hours.monday.is_none());
    }

    #[test]
    fn empty_file_with_header_yields_empty_report() {
        let report = ingest_reader(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(report.records.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = ingest_csv(Path::new("/nonexistent/bookstores.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
