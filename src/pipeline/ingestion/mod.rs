pub mod coerce;
pub mod header_map;
pub mod row;

use tracing::debug;

use crate::domain::{CanonicalField, CaseRecord, CellValue};
use crate::error::{CaseTrackError, Result};

pub use coerce::CoercionWarning;
pub use header_map::{normalize_header, HeaderMap};

/// Everything a successful ingestion produces: ordered records, the verbatim
/// header strings for downstream display, and any coercion warnings.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub records: Vec<CaseRecord>,
    pub headers: Vec<String>,
    pub warnings: Vec<CoercionWarning>,
}

/// Run the full ingestion pipeline over one in-memory worksheet.
///
/// Row 0 is the header row; the rest are data rows. This is a pure transform:
/// it touches no storage and returns either the complete record set or one of
/// the structural failures, never a partial mix.
pub fn ingest_sheet(rows: &[Vec<CellValue>], header_map: &HeaderMap) -> Result<IngestOutcome> {
    if rows.len() < 2 {
        return Err(CaseTrackError::EmptySheet);
    }

    let headers: Vec<String> = rows[0].iter().map(coerce::coerce_text).collect();

    let field_map: Vec<Option<CanonicalField>> =
        headers.iter().map(|h| header_map.resolve(h)).collect();

    if !field_map.contains(&Some(CanonicalField::Id)) {
        return Err(CaseTrackError::MissingRequiredColumn);
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (i, data_row) in rows[1..].iter().enumerate() {
        let sheet_row = i + 1;
        let mapped = row::map_row(
            &headers,
            &field_map,
            data_row,
            sheet_row,
            records.len(),
            &mut warnings,
        );
        match mapped {
            Some(record) => records.push(record),
            None => debug!(sheet_row, "skipping blank row"),
        }
    }

    if records.is_empty() {
        return Err(CaseTrackError::NoValidRows);
    }

    Ok(IngestOutcome {
        records,
        headers,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::Text(c.to_string())).collect()
    }

    fn map() -> HeaderMap {
        HeaderMap::builtin()
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let rows = vec![text_row(&["Case Number", "Agent"])];
        let err = ingest_sheet(&rows, &map()).unwrap_err();
        assert!(matches!(err, CaseTrackError::EmptySheet));
    }

    #[test]
    fn zero_row_sheet_is_empty() {
        let err = ingest_sheet(&[], &map()).unwrap_err();
        assert!(matches!(err, CaseTrackError::EmptySheet));
    }

    #[test]
    fn sheet_without_case_number_column_is_rejected() {
        let rows = vec![text_row(&["Foo", "Bar"]), text_row(&["a", "b"])];
        let err = ingest_sheet(&rows, &map()).unwrap_err();
        assert!(matches!(err, CaseTrackError::MissingRequiredColumn));
    }

    #[test]
    fn all_blank_data_rows_is_no_valid_rows() {
        let rows = vec![
            text_row(&["Case Number", "Agent"]),
            text_row(&["", ""]),
            vec![CellValue::Empty, CellValue::Empty],
        ];
        let err = ingest_sheet(&rows, &map()).unwrap_err();
        assert!(matches!(err, CaseTrackError::NoValidRows));
    }

    #[test]
    fn minimal_sheet_yields_one_backfilled_record() {
        let rows = vec![
            text_row(&["Case Number", "Priority"]),
            text_row(&["CS-1", "Urgent"]),
        ];
        let outcome = ingest_sheet(&rows, &map()).unwrap();
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.id, "CS-1");
        assert_eq!(record.priority, "Urgent");
        assert_eq!(record.date, "");
        assert_eq!(record.agent, "");
        assert_eq!(record.status, "");
        assert_eq!(outcome.headers, vec!["Case Number", "Priority"]);
    }

    #[test]
    fn record_count_matches_non_blank_rows_and_order_is_preserved() {
        let rows = vec![
            text_row(&["Case Number"]),
            text_row(&["CS-1"]),
            text_row(&[""]),
            text_row(&["CS-2"]),
            text_row(&["CS-3"]),
        ];
        let outcome = ingest_sheet(&rows, &map()).unwrap();
        assert_eq!(outcome.records.len(), 3);
        let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["CS-1", "CS-2", "CS-3"]);
        let ordinals: Vec<_> = outcome.records.iter().map(|r| r.row_index).collect();
        assert_eq!(ordinals, [0, 1, 2]);
    }

    #[test]
    fn synthetic_id_counts_sheet_rows_including_blanks() {
        let rows = vec![
            text_row(&["Case Number", "Agent"]),
            text_row(&["", "Dana"]),
            text_row(&["", ""]),
            text_row(&["", "Priya"]),
        ];
        let outcome = ingest_sheet(&rows, &map()).unwrap();
        assert_eq!(outcome.records[0].id, "ROW-1");
        // The blank second data row still advances the sheet row counter.
        assert_eq!(outcome.records[1].id, "ROW-3");
        assert_eq!(outcome.records[1].row_index, 1);
    }

    #[test]
    fn headers_come_back_verbatim_not_normalized() {
        let rows = vec![
            text_row(&["Case Number", "Met / Not Met TAT"]),
            text_row(&["CS-1", "Met"]),
        ];
        let outcome = ingest_sheet(&rows, &map()).unwrap();
        assert_eq!(outcome.headers[1], "Met / Not Met TAT");
        assert_eq!(outcome.records[0].status, "Met");
    }

    #[test]
    fn ingest_is_deterministic() {
        let rows = vec![
            text_row(&["Case Number", "Date", "Assigned Time"]),
            vec![
                CellValue::Text("CS-1".into()),
                CellValue::Number(45678.0),
                CellValue::Number(0.375),
            ],
        ];
        let a = ingest_sheet(&rows, &map()).unwrap();
        let b = ingest_sheet(&rows, &map()).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.headers, b.headers);
        assert_eq!(a.records[0].date, "01/21/2025");
        assert_eq!(a.records[0].assigned_time, "09:00");
    }
}
