//! Database query functions.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::error::DbError;
use crate::{Database, DbResult};

impl Database {
    /// Check whether a setting exists.
    pub fn contains_setting(&self, key: &str) -> DbResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)",
            params![key],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Load a setting's string list.
    pub fn load_setting(&self, key: &str) -> DbResult<Option<Vec<String>>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?", params![key], |row| row.get(0))
            .optional()?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| {
                DbError::Serialization(format!("Failed to parse setting {key}: {e}"))
            })
        })
        .transpose()
    }

    /// Save a setting (insert or update).
    pub fn save_setting(&self, key: &str, value: &[String]) -> DbResult<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            DbError::Serialization(format!("Failed to serialize setting {key}: {e}"))
        })?;

        self.conn.execute(
            r"INSERT INTO settings (key, value, updated_at)
              VALUES (?, ?, datetime('now'))
              ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')",
            params![key, json],
        )?;
        debug!(key, count = value.len(), "Saved setting");
        Ok(())
    }

    /// Delete a setting. Returns `false` if it did not exist.
    pub fn remove_setting(&self, key: &str) -> DbResult<bool> {
        let deleted = self.conn.execute("DELETE FROM settings WHERE key = ?", params![key])?;
        Ok(deleted > 0)
    }
}
