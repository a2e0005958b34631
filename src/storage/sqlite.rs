use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{CanonicalField, CaseRecord};
use crate::error::{CaseTrackError, Result};

use super::{apply_field_update, CaseStore, StoredCases};

const HEADERS_KEY: &str = "headers";

/// SQLite-backed case store.
///
/// Records are stored as JSON rows keyed by their ingestion ordinal, which
/// also gives `fetch_all` its ordering. The upload path runs clear-then-insert
/// inside one transaction so a failed upload leaves the previous set intact.
pub struct SqliteCaseStore {
    conn: Mutex<Connection>,
}

impl SqliteCaseStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS cases (
                row_index INTEGER PRIMARY KEY,
                case_id   TEXT NOT NULL,
                data      TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sheet_meta (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        info!(path = %db_path.display(), "opened case store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                row_index INTEGER PRIMARY KEY,
                case_id   TEXT NOT NULL,
                data      TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sheet_meta (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn update_record<F>(&self, case_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut CaseRecord),
    {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let data: Option<String> = tx
            .query_row(
                "SELECT data FROM cases WHERE case_id = ?1",
                params![case_id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let data = data.ok_or_else(|| CaseTrackError::CaseNotFound(case_id.to_string()))?;
        let mut record: CaseRecord = serde_json::from_str(&data)?;
        f(&mut record);

        tx.execute(
            "UPDATE cases SET data = ?1 WHERE case_id = ?2",
            params![serde_json::to_string(&record)?, case_id],
        )?;
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl CaseStore for SqliteCaseStore {
    async fn replace_all(&self, records: &[CaseRecord], headers: &[String]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM cases", [])?;
        tx.execute("DELETE FROM sheet_meta", [])?;

        tx.execute(
            "INSERT INTO sheet_meta (key, value) VALUES (?1, ?2)",
            params![HEADERS_KEY, serde_json::to_string(headers)?],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO cases (row_index, case_id, data) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.row_index as i64,
                    record.id,
                    serde_json::to_string(record)?
                ])?;
            }
        }

        tx.commit()?;
        debug!(count = records.len(), "replaced stored case set");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<StoredCases> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT data FROM cases ORDER BY row_index")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let data: String = row.get(0)?;
            records.push(serde_json::from_str(&data)?);
        }

        let headers: Vec<String> = conn
            .query_row(
                "SELECT value FROM sheet_meta WHERE key = ?1",
                params![HEADERS_KEY],
                |row| row.get::<_, String>(0),
            )
            .map(|json| serde_json::from_str(&json))
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(Ok(Vec::new())),
                other => Err(other),
            })??;

        Ok(StoredCases { records, headers })
    }

    async fn update_agent(&self, case_id: &str, agent: &str) -> Result<()> {
        self.update_record(case_id, |record| {
            apply_field_update(record, CanonicalField::Agent, agent);
        })
    }

    async fn update_status(
        &self,
        case_id: &str,
        status: &str,
        touched: Option<&str>,
    ) -> Result<()> {
        self.update_record(case_id, |record| {
            apply_field_update(record, CanonicalField::Status, status);
            if let Some(touched) = touched {
                apply_field_update(record, CanonicalField::Touched, touched);
            }
        })
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM cases", [])?;
        conn.execute("DELETE FROM sheet_meta", [])?;
        Ok(())
    }
}
