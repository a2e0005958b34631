use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single spreadsheet cell as handed to the pipeline by the workbook reader.
///
/// The pipeline only ever sees strings, numbers, or nothing; the reader is
/// responsible for flattening richer workbook cell types into this shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// A cell counts as blank for row filtering if it holds no value at all.
    /// A numeric zero is a real value, not a blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

/// The fixed set of recognized case attributes, as opposed to arbitrary
/// spreadsheet columns which are retained only in `raw_columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Id,
    Date,
    Agent,
    AssignedTime,
    Priority,
    ExpectedTime,
    Touched,
    TouchedTimeFix,
    Status,
}

/// How a canonical field's cells are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Time,
    Text,
}

impl CanonicalField {
    pub fn kind(&self) -> FieldKind {
        match self {
            CanonicalField::Date => FieldKind::Date,
            CanonicalField::AssignedTime
            | CanonicalField::ExpectedTime
            | CanonicalField::Touched
            | CanonicalField::TouchedTimeFix => FieldKind::Time,
            _ => FieldKind::Text,
        }
    }

}

/// One ingested case row in canonical form.
///
/// `row_index` is the explicit 0-based ordinal assigned at ingestion; it is
/// what restores the original sheet order after a round trip through a store
/// that does not guarantee read order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub date: String,
    pub agent: String,
    pub assigned_time: String,
    pub priority: String,
    pub expected_time: String,
    pub touched: String,
    pub touched_time_fix: String,
    pub status: String,
    pub row_index: usize,
    /// Verbatim mirror of every original column, recognized or not, keyed by
    /// the original (un-normalized) header text.
    pub raw_columns: BTreeMap<String, String>,
}

impl CaseRecord {
    pub fn empty(row_index: usize) -> Self {
        Self {
            id: String::new(),
            date: String::new(),
            agent: String::new(),
            assigned_time: String::new(),
            priority: String::new(),
            expected_time: String::new(),
            touched: String::new(),
            touched_time_fix: String::new(),
            status: String::new(),
            row_index,
            raw_columns: BTreeMap::new(),
        }
    }

    pub fn set_field(&mut self, field: CanonicalField, value: String) {
        match field {
            CanonicalField::Id => self.id = value,
            CanonicalField::Date => self.date = value,
            CanonicalField::Agent => self.agent = value,
            CanonicalField::AssignedTime => self.assigned_time = value,
            CanonicalField::Priority => self.priority = value,
            CanonicalField::ExpectedTime => self.expected_time = value,
            CanonicalField::Touched => self.touched = value,
            CanonicalField::TouchedTimeFix => self.touched_time_fix = value,
            CanonicalField::Status => self.status = value,
        }
    }

}

/// Per-agent workload rollup derived from the full record set.
///
/// Recomputed wholesale whenever the record set changes; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
    pub assigned_count: u64,
    pub urgent_count: u64,
    pub completed_count: u64,
    pub total_count: u64,
}

/// Whole-set TAT compliance counts, for the lead dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TatStats {
    pub met: u64,
    pub not_met: u64,
    pub other: u64,
    pub urgent: u64,
    pub total: u64,
}
