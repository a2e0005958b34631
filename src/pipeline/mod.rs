// Data processing pipeline: spreadsheet ingestion and derived summaries

pub mod ingestion;
pub mod query;
pub mod summary;
