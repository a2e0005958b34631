use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::domain::CanonicalField;
use crate::error::{CaseTrackError, Result};
use crate::pipeline::ingestion::HeaderMap;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "data/cases.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct IngestConfig {
    /// Surface per-cell coercion warnings at WARN instead of DEBUG.
    #[serde(default)]
    pub strict: bool,
    /// Extra header synonyms overlaying the built-in table, e.g.
    /// `"case ref" = "id"`. Field names use the canonical camelCase spelling.
    #[serde(default)]
    pub synonyms: HashMap<String, CanonicalField>,
}

impl Config {
    /// Load from `config.toml` in the working directory, falling back to
    /// defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            CaseTrackError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Header mapping table for this run: built-ins plus configured extras.
    pub fn header_map(&self) -> HeaderMap {
        if self.ingest.synonyms.is_empty() {
            HeaderMap::builtin()
        } else {
            HeaderMap::with_extra_synonyms(
                self.ingest.synonyms.iter().map(|(k, v)| (k.as_str(), *v)),
            )
        }
    }
}
