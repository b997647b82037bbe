//! Pulse2JACK Settings - SQLite persistence layer.
//!
//! This crate stores settings as string lists keyed by name, which is all the
//! bridge list needs, and implements [`SettingsStore`] for [`Database`].

pub mod error;
pub mod migrations;
pub mod queries;
pub mod schema;

pub use error::{DbError, DbResult};

use directories::ProjectDirs;
use pulse2jack_core::SettingsStore;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{debug, info};

/// Database handle for Pulse2JACK settings.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the default location.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open() -> DbResult<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    /// Open or create the database at a specific path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open_at(path: PathBuf) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!(?path, "Opening settings database");
        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> DbResult<Self> {
        debug!("Opening in-memory settings database");
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the default database path.
    ///
    /// # Errors
    /// Returns [`DbError::NoDataDir`] if no data directory is available.
    pub fn default_path() -> DbResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "pulse2jack", "Pulse2JACK").ok_or(DbError::NoDataDir)?;
        Ok(dirs.data_dir().join("settings.db"))
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.conn.path()).finish()
    }
}

impl SettingsStore for Database {
    fn contains(&self, key: &str) -> pulse2jack_core::Result<bool> {
        Ok(self.contains_setting(key)?)
    }

    fn value(&self, key: &str) -> pulse2jack_core::Result<Option<Vec<String>>> {
        Ok(self.load_setting(key)?)
    }

    fn set_value(&mut self, key: &str, value: &[String]) -> pulse2jack_core::Result<()> {
        Ok(self.save_setting(key, value)?)
    }
}
