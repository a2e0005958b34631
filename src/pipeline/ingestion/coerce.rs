use chrono::{Duration, NaiveDate};

use crate::domain::{CellValue, FieldKind};

/// Offset between the Excel day-serial epoch and 1970-01-01.
const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25569.0;

/// A non-fatal note about a cell that coerced to a fallback value.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    pub message: String,
}

impl CoercionWarning {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Coerce one cell to its canonical string form for the given field kind.
///
/// Pure and deterministic. Coercion never fails: values that cannot be
/// interpreted fall back to an empty string, optionally reporting a warning.
pub fn coerce_cell(kind: FieldKind, cell: &CellValue) -> (String, Option<CoercionWarning>) {
    match kind {
        FieldKind::Date => coerce_date(cell),
        FieldKind::Time => (coerce_time(cell), None),
        FieldKind::Text => (coerce_text(cell), None),
    }
}

/// Date cells: strings pass through unchanged; numbers are Excel day-serials.
/// Zero, empty, and absent all mean "no value" and yield an empty string.
fn coerce_date(cell: &CellValue) -> (String, Option<CoercionWarning>) {
    match cell {
        CellValue::Empty => (String::new(), None),
        CellValue::Text(s) => (s.clone(), None),
        CellValue::Number(n) if *n == 0.0 => (String::new(), None),
        CellValue::Number(n) => match serial_to_date(*n) {
            Some(date) => (date.format("%m/%d/%Y").to_string(), None),
            None => (
                String::new(),
                Some(CoercionWarning::new(format!(
                    "date serial {} is out of range, coerced to empty",
                    n
                ))),
            ),
        },
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let utc_days = (serial - EXCEL_EPOCH_OFFSET_DAYS).floor();
    // NaiveDate covers roughly +/-262000 years; anything outside is garbage
    if utc_days.abs() > 95_000_000.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(Duration::days(utc_days as i64))
}

/// Time cells: strings are trimmed and passed through; numbers are fractions
/// of a 24-hour day, rounded to the nearest minute. The hour wraps modulo 24
/// so a fraction that rounds up to a full day prints "00:00", not "24:00".
fn coerce_time(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => {
            if !n.is_finite() {
                return String::new();
            }
            let total_minutes = (n * 24.0 * 60.0).round() as i64;
            let hh = total_minutes.div_euclid(60).rem_euclid(24);
            let mm = total_minutes.rem_euclid(60);
            format!("{:02}:{:02}", hh, mm)
        }
    }
}

/// Everything else: straightforward stringification, trimmed.
/// Integral floats print without a trailing ".0" so case numbers stored as
/// numbers round-trip cleanly.
pub fn coerce_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_serial_45678_is_january_21_2025() {
        let (out, warn) = coerce_cell(FieldKind::Date, &CellValue::Number(45678.0));
        assert_eq!(out, "01/21/2025");
        assert!(warn.is_none());
    }

    #[test]
    fn date_string_passes_through_unchanged() {
        let (out, _) = coerce_cell(FieldKind::Date, &CellValue::Text("1/5/2025".into()));
        assert_eq!(out, "1/5/2025");
    }

    #[test]
    fn date_zero_and_empty_mean_no_value() {
        assert_eq!(coerce_cell(FieldKind::Date, &CellValue::Number(0.0)).0, "");
        assert_eq!(coerce_cell(FieldKind::Date, &CellValue::Empty).0, "");
    }

    #[test]
    fn out_of_range_date_serial_warns_and_falls_back() {
        let (out, warn) = coerce_cell(FieldKind::Date, &CellValue::Number(f64::NAN));
        assert_eq!(out, "");
        assert!(warn.is_some());
    }

    #[test]
    fn time_fraction_0_375_is_nine_am() {
        let (out, _) = coerce_cell(FieldKind::Time, &CellValue::Number(0.375));
        assert_eq!(out, "09:00");
    }

    #[test]
    fn time_fraction_near_one_wraps_to_midnight() {
        let (out, _) = coerce_cell(FieldKind::Time, &CellValue::Number(0.99999));
        assert_eq!(out, "00:00");
    }

    #[test]
    fn time_fraction_zero_is_midnight() {
        let (out, _) = coerce_cell(FieldKind::Time, &CellValue::Number(0.0));
        assert_eq!(out, "00:00");
    }

    #[test]
    fn time_string_is_trimmed() {
        let (out, _) = coerce_cell(FieldKind::Time, &CellValue::Text("  09:30 ".into()));
        assert_eq!(out, "09:30");
    }

    #[test]
    fn text_trims_and_drops_trailing_point_zero() {
        assert_eq!(coerce_text(&CellValue::Text("  Urgent ".into())), "Urgent");
        assert_eq!(coerce_text(&CellValue::Number(12345.0)), "12345");
        assert_eq!(coerce_text(&CellValue::Number(12.5)), "12.5");
        assert_eq!(coerce_text(&CellValue::Empty), "");
    }

    #[test]
    fn coercion_is_deterministic() {
        let cell = CellValue::Number(45678.0);
        assert_eq!(
            coerce_cell(FieldKind::Date, &cell),
            coerce_cell(FieldKind::Date, &cell)
        );
    }
}
