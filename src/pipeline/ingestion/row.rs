use crate::domain::{CanonicalField, CaseRecord, CellValue, FieldKind};

use super::coerce::{coerce_cell, CoercionWarning};

/// True when every cell in the row is empty, meaning the row carries no data
/// and should produce no record at all.
pub fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// Map one data row into a `CaseRecord`.
///
/// `headers` are the verbatim header strings, `field_map` the per-column
/// canonical field resolution (positionally aligned with `headers`),
/// `sheet_row` the 1-based data-row number in the source sheet (used for the
/// synthetic id), and `row_index` the 0-based ordinal among emitted records.
///
/// Returns `None` for blank rows. Coercion warnings from individual cells are
/// appended to `warnings`.
pub fn map_row(
    headers: &[String],
    field_map: &[Option<CanonicalField>],
    row: &[CellValue],
    sheet_row: usize,
    row_index: usize,
    warnings: &mut Vec<CoercionWarning>,
) -> Option<CaseRecord> {
    if is_blank_row(row) {
        return None;
    }

    let mut record = CaseRecord::empty(row_index);

    for (col, header) in headers.iter().enumerate() {
        let field = field_map.get(col).copied().flatten();
        let cell = row.get(col).unwrap_or(&CellValue::Empty);

        let kind = field.map(|f| f.kind()).unwrap_or(FieldKind::Text);
        let (value, warning) = coerce_cell(kind, cell);
        if let Some(mut w) = warning {
            w.message = format!("row {}, column \"{}\": {}", sheet_row, header, w.message);
            warnings.push(w);
        }

        if let Some(field) = field {
            record.set_field(field, value.clone());
        }
        // Every column is mirrored under its original header, matched or not.
        if !header.is_empty() {
            record.raw_columns.insert(header.clone(), value);
        }
    }

    if record.id.is_empty() {
        record.id = format!("ROW-{}", sheet_row);
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_row_produces_no_record() {
        let row = vec![CellValue::Empty, CellValue::Text("".into())];
        assert!(is_blank_row(&row));
        let mut warnings = Vec::new();
        let mapped = map_row(
            &headers(&["Case Number", "Agent"]),
            &[Some(CanonicalField::Id), Some(CanonicalField::Agent)],
            &row,
            1,
            0,
            &mut warnings,
        );
        assert!(mapped.is_none());
    }

    #[test]
    fn zero_cell_is_not_blank() {
        assert!(!is_blank_row(&[CellValue::Number(0.0)]));
    }

    #[test]
    fn recognized_and_unrecognized_columns_both_land_in_raw() {
        let mut warnings = Vec::new();
        let record = map_row(
            &headers(&["Case Number", "Notes"]),
            &[Some(CanonicalField::Id), None],
            &[
                CellValue::Text("CS-1".into()),
                CellValue::Text("call back".into()),
            ],
            1,
            0,
            &mut warnings,
        )
        .unwrap();

        assert_eq!(record.id, "CS-1");
        assert_eq!(record.raw_columns["Case Number"], "CS-1");
        assert_eq!(record.raw_columns["Notes"], "call back");
    }

    #[test]
    fn missing_canonical_fields_backfill_to_empty() {
        let mut warnings = Vec::new();
        let record = map_row(
            &headers(&["Case Number", "Priority"]),
            &[Some(CanonicalField::Id), Some(CanonicalField::Priority)],
            &[
                CellValue::Text("CS-1".into()),
                CellValue::Text("Urgent".into()),
            ],
            1,
            0,
            &mut warnings,
        )
        .unwrap();

        assert_eq!(record.priority, "Urgent");
        assert_eq!(record.date, "");
        assert_eq!(record.agent, "");
        assert_eq!(record.status, "");
        assert_eq!(record.assigned_time, "");
    }

    #[test]
    fn missing_id_gets_synthetic_row_number() {
        let mut warnings = Vec::new();
        let record = map_row(
            &headers(&["Case Number", "Agent"]),
            &[Some(CanonicalField::Id), Some(CanonicalField::Agent)],
            &[CellValue::Empty, CellValue::Text("Dana".into())],
            3,
            1,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(record.id, "ROW-3");
        assert_eq!(record.row_index, 1);
    }

    #[test]
    fn short_row_treats_missing_cells_as_empty() {
        let mut warnings = Vec::new();
        let record = map_row(
            &headers(&["Case Number", "Agent", "Priority"]),
            &[
                Some(CanonicalField::Id),
                Some(CanonicalField::Agent),
                Some(CanonicalField::Priority),
            ],
            &[CellValue::Text("CS-9".into())],
            1,
            0,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(record.agent, "");
        assert_eq!(record.priority, "");
        assert_eq!(record.raw_columns["Agent"], "");
    }
}
