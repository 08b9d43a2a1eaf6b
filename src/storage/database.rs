//! `SQLite` database connection and key/value operations.
//!
//! The database is stored at `~/.quasar/quasar.db`. Each document lives
//! under its own key in the `kv` table.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::QuasarError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, QuasarError> {
        let conn = Connection::open(path).map_err(|e| {
            QuasarError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "opened database");

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, QuasarError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QuasarError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), QuasarError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, QuasarError> {
        migrations::get_version(&self.conn)
    }

    /// Read the raw document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, key: &str) -> Result<Option<String>, QuasarError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| QuasarError::Database(format!("Failed to read '{key}': {e}")))
    }

    /// Store `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put(&self, key: &str, value: &str) -> Result<(), QuasarError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(|e| QuasarError::Database(format!("Failed to write '{key}': {e}")))?;
        tracing::debug!(key, bytes = value.len(), "stored document");
        Ok(())
    }

    /// Store several documents atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is stored in that case.
    pub fn put_all(&self, entries: &[(&str, String)]) -> Result<(), QuasarError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| QuasarError::Database(format!("Failed to begin transaction: {e}")))?;
        for (key, value) in entries {
            self.put(key, value)?;
        }
        tx.commit()
            .map_err(|e| QuasarError::Database(format!("Failed to commit transaction: {e}")))
    }

    /// Keys currently stored, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn keys(&self) -> Result<Vec<String>, QuasarError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_reopen_database_keeps_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.put("nq_goals", "[]").unwrap();
        }

        {
            let db = Database::open_at(&db_path).unwrap();
            assert_eq!(db.get("nq_goals").unwrap().as_deref(), Some("[]"));
        }
    }

    #[test]
    fn test_put_replaces() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("k").unwrap().is_none());
        db.put("k", "1").unwrap();
        db.put("k", "2").unwrap();
        assert_eq!(db.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(db.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_put_all() {
        let db = Database::open_in_memory().unwrap();
        db.put_all(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(db.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
