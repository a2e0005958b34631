use async_trait::async_trait;
use std::sync::Mutex;
use tracing::debug;

use crate::domain::{CanonicalField, CaseRecord};
use crate::error::{CaseTrackError, Result};

use super::{apply_field_update, CaseStore, StoredCases};

/// In-memory case store for development and testing.
pub struct InMemoryCaseStore {
    state: Mutex<StoredCases>,
}

impl Default for InMemoryCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoredCases::default()),
        }
    }

    fn with_record<F>(&self, case_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut CaseRecord),
    {
        let mut state = self.state.lock().unwrap();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == case_id)
            .ok_or_else(|| CaseTrackError::CaseNotFound(case_id.to_string()))?;
        f(record);
        Ok(())
    }
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn replace_all(&self, records: &[CaseRecord], headers: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.records = records.to_vec();
        state.headers = headers.to_vec();
        debug!(count = records.len(), "replaced in-memory case set");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<StoredCases> {
        let state = self.state.lock().unwrap();
        let mut out = state.clone();
        out.records.sort_by_key(|r| r.row_index);
        Ok(out)
    }

    async fn update_agent(&self, case_id: &str, agent: &str) -> Result<()> {
        self.with_record(case_id, |record| {
            apply_field_update(record, CanonicalField::Agent, agent);
        })
    }

    async fn update_status(
        &self,
        case_id: &str,
        status: &str,
        touched: Option<&str>,
    ) -> Result<()> {
        self.with_record(case_id, |record| {
            apply_field_update(record, CanonicalField::Status, status);
            if let Some(touched) = touched {
                apply_field_update(record, CanonicalField::Touched, touched);
            }
        })
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state = StoredCases::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, row_index: usize) -> CaseRecord {
        let mut r = CaseRecord::empty(row_index);
        r.id = id.into();
        r
    }

    #[tokio::test]
    async fn replace_then_fetch_round_trips_in_order() {
        let store = InMemoryCaseStore::new();
        let records = vec![record("CS-2", 1), record("CS-1", 0)];
        store
            .replace_all(&records, &["Case Number".to_string()])
            .await
            .unwrap();

        let stored = store.fetch_all().await.unwrap();
        let ids: Vec<_> = stored.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["CS-1", "CS-2"]);
        assert_eq!(stored.headers, ["Case Number"]);
    }

    #[tokio::test]
    async fn replace_all_swaps_the_whole_set() {
        let store = InMemoryCaseStore::new();
        store.replace_all(&[record("OLD", 0)], &[]).await.unwrap();
        store.replace_all(&[record("NEW", 0)], &[]).await.unwrap();

        let stored = store.fetch_all().await.unwrap();
        assert_eq!(stored.records.len(), 1);
        assert_eq!(stored.records[0].id, "NEW");
    }

    #[tokio::test]
    async fn update_agent_on_missing_case_is_not_found() {
        let store = InMemoryCaseStore::new();
        let err = store.update_agent("CS-404", "Dana").await.unwrap_err();
        assert!(matches!(err, CaseTrackError::CaseNotFound(_)));
    }

    #[tokio::test]
    async fn update_status_stamps_touched_time() {
        let store = InMemoryCaseStore::new();
        store.replace_all(&[record("CS-1", 0)], &[]).await.unwrap();
        store
            .update_status("CS-1", "Met", Some("14:30"))
            .await
            .unwrap();

        let stored = store.fetch_all().await.unwrap();
        assert_eq!(stored.records[0].status, "Met");
        assert_eq!(stored.records[0].touched, "14:30");
    }
}
