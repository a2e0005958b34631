use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::CellValue;
use crate::error::{CaseTrackError, Result};
use crate::infra::workbook;
use crate::observability::metrics;
use crate::pipeline::ingestion::{ingest_sheet, CoercionWarning, HeaderMap};
use crate::storage::CaseStore;

/// What an upload run reports back to the caller.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub run_id: Uuid,
    pub rows_ingested: usize,
    pub rows_skipped_blank: usize,
    pub headers: Vec<String>,
    pub warnings: Vec<String>,
}

/// Use case for the upload workflow: read the workbook, run the ingestion
/// pipeline, then atomically replace the stored record set.
///
/// The pipeline itself is pure; this is where its output crosses the
/// persistence boundary. A structural failure aborts before any write, so
/// the previously stored set stays untouched.
pub struct IngestUseCase {
    store: Arc<dyn CaseStore>,
    header_map: HeaderMap,
    strict: bool,
}

impl IngestUseCase {
    pub fn new(store: Arc<dyn CaseStore>, header_map: HeaderMap, strict: bool) -> Self {
        Self {
            store,
            header_map,
            strict,
        }
    }

    /// Ingest a spreadsheet file and replace the stored case set.
    pub async fn run<P: AsRef<Path>>(&self, path: P) -> Result<IngestReport> {
        let path = path.as_ref();
        let run_id = Uuid::new_v4();
        info!(%run_id, file = %path.display(), "starting ingestion run");

        let loaded = workbook::read_first_sheet(path)?;
        self.ingest_rows(run_id, &loaded.rows, loaded.warnings).await
    }

    /// Ingest rows already loaded into memory. Split out so callers with
    /// their own reader (and tests) can reuse the rest of the workflow.
    pub async fn ingest_rows(
        &self,
        run_id: Uuid,
        rows: &[Vec<CellValue>],
        reader_warnings: Vec<CoercionWarning>,
    ) -> Result<IngestReport> {
        let outcome = ingest_sheet(rows, &self.header_map).map_err(|e| {
            metrics::ingest::sheet_rejected(rejection_reason(&e));
            e
        })?;

        let data_rows = rows.len().saturating_sub(1);
        let rows_skipped_blank = data_rows - outcome.records.len();

        let mut warnings: Vec<String> =
            reader_warnings.into_iter().map(|w| w.message).collect();
        warnings.extend(outcome.warnings.iter().map(|w| w.message.clone()));

        for message in &warnings {
            metrics::ingest::coercion_warning();
            if self.strict {
                warn!(%run_id, "{}", message);
            } else {
                debug!(%run_id, "{}", message);
            }
        }

        self.store
            .replace_all(&outcome.records, &outcome.headers)
            .await?;

        metrics::ingest::rows_ingested(outcome.records.len() as u64);
        metrics::ingest::rows_skipped_blank(rows_skipped_blank as u64);
        metrics::ingest::upload_replaced(outcome.records.len() as u64);

        info!(
            %run_id,
            rows = outcome.records.len(),
            skipped = rows_skipped_blank,
            warnings = warnings.len(),
            "ingestion run complete"
        );

        Ok(IngestReport {
            run_id,
            rows_ingested: outcome.records.len(),
            rows_skipped_blank,
            headers: outcome.headers,
            warnings,
        })
    }
}

fn rejection_reason(err: &CaseTrackError) -> &'static str {
    match err {
        CaseTrackError::EmptySheet => "empty_sheet",
        CaseTrackError::MissingRequiredColumn => "missing_required_column",
        CaseTrackError::NoValidRows => "no_valid_rows",
        _ => "other",
    }
}
