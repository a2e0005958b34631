// Application use cases wiring the pipeline to its collaborators

pub mod ingest_use_case;

pub use ingest_use_case::{IngestReport, IngestUseCase};
