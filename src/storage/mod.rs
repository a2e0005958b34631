pub mod in_memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::domain::{CanonicalField, CaseRecord};
use crate::error::Result;
use crate::pipeline::ingestion::HeaderMap;

pub use in_memory::InMemoryCaseStore;
pub use sqlite::SqliteCaseStore;

/// The stored record set: records restored to sheet order plus the header
/// list persisted alongside them at upload time.
#[derive(Debug, Clone, Default)]
pub struct StoredCases {
    pub records: Vec<CaseRecord>,
    pub headers: Vec<String>,
}

/// Persistence port for the case record set.
///
/// `replace_all` is the upload contract: the previous record set and headers
/// are cleared and the new ones written inside a single transaction boundary,
/// so readers never observe a mix of old and new rows. Concurrent uploads
/// serialize on that boundary.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Atomically replace the entire record set and header list.
    async fn replace_all(&self, records: &[CaseRecord], headers: &[String]) -> Result<()>;

    /// Fetch everything, records ordered by their ingestion ordinal.
    async fn fetch_all(&self) -> Result<StoredCases>;

    /// Reassign a case to an agent, keeping the raw-column mirror in sync.
    async fn update_agent(&self, case_id: &str, agent: &str) -> Result<()>;

    /// Record a TAT resolution on a case, optionally stamping the touched time.
    async fn update_status(&self, case_id: &str, status: &str, touched: Option<&str>)
        -> Result<()>;

    /// Drop all stored records and headers.
    async fn clear(&self) -> Result<()>;
}

/// Write a canonical field onto a record and into every raw-column slot whose
/// header resolves to that field, so list views rendered from `raw_columns`
/// stay consistent with the canonical value.
pub(crate) fn apply_field_update(record: &mut CaseRecord, field: CanonicalField, value: &str) {
    record.set_field(field, value.to_string());
    let header_map = HeaderMap::builtin();
    for (header, cell) in record.raw_columns.iter_mut() {
        if header_map.resolve(header) == Some(field) {
            *cell = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_update_rewrites_matching_raw_columns() {
        let mut record = CaseRecord::empty(0);
        record.raw_columns.insert("Agent Name".into(), "Dana".into());
        record.raw_columns.insert("Notes".into(), "unchanged".into());

        apply_field_update(&mut record, CanonicalField::Agent, "Priya");

        assert_eq!(record.agent, "Priya");
        assert_eq!(record.raw_columns["Agent Name"], "Priya");
        assert_eq!(record.raw_columns["Notes"], "unchanged");
    }
}
