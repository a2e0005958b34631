//! Metrics facade for the ingestion and reporting paths.
//!
//! Counter names follow Prometheus conventions; recording is a no-op unless
//! the embedding process installs a recorder.

pub mod ingest {
    pub fn rows_ingested(count: u64) {
        ::metrics::counter!("casetrack_ingest_rows_total").increment(count);
    }

    pub fn rows_skipped_blank(count: u64) {
        ::metrics::counter!("casetrack_ingest_rows_skipped_blank_total").increment(count);
    }

    pub fn coercion_warning() {
        ::metrics::counter!("casetrack_ingest_coercion_warnings_total").increment(1);
    }

    pub fn sheet_rejected(reason: &'static str) {
        ::metrics::counter!("casetrack_ingest_rejected_total", "reason" => reason).increment(1);
    }

    pub fn upload_replaced(records: u64) {
        ::metrics::counter!("casetrack_store_replace_total").increment(1);
        ::metrics::gauge!("casetrack_store_records").set(records as f64);
    }
}

pub mod summary {
    pub fn computed(buckets: u64) {
        ::metrics::counter!("casetrack_summary_computed_total").increment(1);
        ::metrics::gauge!("casetrack_summary_agent_buckets").set(buckets as f64);
    }
}
