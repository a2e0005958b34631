use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseTrackError {
    #[error("Spreadsheet has no data rows.")]
    EmptySheet,

    #[error("Could not find a \"Case Number\" column. Check the spreadsheet headers.")]
    MissingRequiredColumn,

    #[error("No valid rows found in the spreadsheet.")]
    NoValidRows,

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, CaseTrackError>;
