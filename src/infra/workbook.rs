use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::CellValue;
use crate::error::{CaseTrackError, Result};
use crate::pipeline::ingestion::CoercionWarning;

/// What the reader hands to the ingestion pipeline: the first worksheet as
/// rows of `CellValue`, plus warnings for cells that had to be flattened.
#[derive(Debug)]
pub struct LoadedSheet {
    pub sheet_name: String,
    pub rows: Vec<Vec<CellValue>>,
    pub warnings: Vec<CoercionWarning>,
}

/// Read the first worksheet of an .xlsx/.xls file into memory.
///
/// This is the only I/O in the ingestion path; once it returns, the pipeline
/// runs synchronously over the loaded rows. Datetime cells surface their
/// underlying day-serial so the coercer applies the same rules to them as to
/// plain numeric cells; error cells become empty values with a warning.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<LoadedSheet> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CaseTrackError::Workbook(format!("{}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CaseTrackError::EmptySheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CaseTrackError::Workbook(format!("sheet \"{}\": {}", sheet_name, e)))?;

    let mut warnings = Vec::new();
    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(|(col_idx, cell)| flatten_cell(cell, row_idx, col_idx, &mut warnings))
                .collect()
        })
        .collect();

    debug!(
        sheet = %sheet_name,
        rows = rows.len(),
        warnings = warnings.len(),
        "loaded worksheet"
    );
    for w in &warnings {
        warn!("{}", w.message);
    }

    Ok(LoadedSheet {
        sheet_name,
        rows,
        warnings,
    })
}

fn flatten_cell(
    cell: &Data,
    row_idx: usize,
    col_idx: usize,
    warnings: &mut Vec<CoercionWarning>,
) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // Keep the raw serial; the coercer owns date/time formatting
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            warnings.push(CoercionWarning {
                message: format!(
                    "cell ({}, {}) holds a spreadsheet error {:?}, treated as empty",
                    row_idx, col_idx, e
                ),
            });
            CellValue::Empty
        }
    }
}
