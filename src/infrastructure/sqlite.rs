// src/infrastructure/sqlite.rs
use crate::application::{KeyValueStore, WriteOp};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

const UPSERT: &str = "
INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
";

/// Persistent store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Open or create the database file, creating parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = PathBuf::from(path.as_ref());
        debug!(?path, "Opening SqliteStore");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if metadata.permissions().readonly() {
                return Err(DomainError::Storage(format!(
                    "No write permission for database: {}",
                    path.display()
                ))
                .into());
            }
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;

        info!(?path, "Opened note database");
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Storage("database lock poisoned".to_string()))
    }
}

fn storage_err(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

impl KeyValueStore for SqliteStore {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.conn()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(storage_err)
    }

    #[instrument(level = "trace", skip(self, value))]
    fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyValue(key.to_string()));
        }
        self.conn()?
            .execute(UPSERT, params![key, value, Utc::now().timestamp_millis()])
            .map_err(storage_err)?;
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.conn()?
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(storage_err)?;
        Ok(())
    }

    /// Runs all operations in one transaction.
    #[instrument(level = "trace", skip(self, ops), fields(op_count = ops.len()))]
    fn write_batch(&self, ops: &[WriteOp]) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(storage_err)?;
        let now = Utc::now().timestamp_millis();

        for op in ops {
            match op {
                WriteOp::Put { key, value } => {
                    if value.is_empty() {
                        // dropping `tx` rolls back
                        return Err(DomainError::EmptyValue(key.clone()));
                    }
                    tx.execute(UPSERT, params![key, value, now])
                        .map_err(storage_err)?;
                }
                WriteOp::Delete { key } => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key])
                        .map_err(storage_err)?;
                }
            }
        }

        tx.commit().map_err(storage_err)
    }
}
