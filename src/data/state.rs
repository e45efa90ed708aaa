//! Project state data access object (key-value store)
//!
//! Every persisted sequence lives as a JSON string under one key, so a
//! store always rewrites its whole sequence rather than individual rows.

use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// Storage key for the serialized scene sequence
pub const SCHEDULE_KEY: &str = "schedule_data";
/// Storage key for the serialized budget sequence
pub const BUDGET_KEY: &str = "budget_data";
/// Storage key for the currency preference code
pub const CURRENCY_KEY: &str = "user_currency";

/// Data access object for project state (key-value store)
#[derive(Clone)]
pub struct StateStore {
    conn: Arc<Mutex<Connection>>,
}

impl StateStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Set a value (insert or update)
    pub fn set(&self, key: &str, value: &str) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO project_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> SqliteResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM project_state WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Delete a key
    pub fn delete(&self, key: &str) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM project_state WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Clear all state
    pub fn clear_all(&self) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM project_state", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Database;
    use tempfile::tempdir;

    fn setup_db() -> (tempfile::TempDir, Database, StateStore) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let store = StateStore::new(db.connection());
        (dir, db, store)
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, _db, store) = setup_db();

        store.set(CURRENCY_KEY, "EUR").unwrap();
        let value = store.get(CURRENCY_KEY).unwrap();
        assert_eq!(value, Some("EUR".to_string()));
    }

    #[test]
    fn test_update() {
        let (_dir, _db, store) = setup_db();

        store.set(SCHEDULE_KEY, "[]").unwrap();
        store.set(SCHEDULE_KEY, "[{}]").unwrap();

        let value = store.get(SCHEDULE_KEY).unwrap();
        assert_eq!(value, Some("[{}]".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, _db, store) = setup_db();

        let value = store.get("nonexistent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_delete() {
        let (_dir, _db, store) = setup_db();

        store.set(BUDGET_KEY, "[]").unwrap();
        store.delete(BUDGET_KEY).unwrap();

        let value = store.get(BUDGET_KEY).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, _db, store) = setup_db();

        store.set(SCHEDULE_KEY, "[]").unwrap();
        store.set(BUDGET_KEY, "[]").unwrap();
        store.clear_all().unwrap();

        assert_eq!(store.get(SCHEDULE_KEY).unwrap(), None);
        assert_eq!(store.get(BUDGET_KEY).unwrap(), None);
    }
}
