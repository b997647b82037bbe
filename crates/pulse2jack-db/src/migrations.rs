//! Schema setup for the settings database.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::schema::{SCHEMA, SCHEMA_VERSION};

/// Create the schema on a fresh database and reject databases written by a
/// newer schema.
pub fn run(conn: &Connection) -> DbResult<()> {
    let version = user_version(conn)?;
    debug!(version, expected = SCHEMA_VERSION, "Checking settings schema");

    match version {
        0 => {
            conn.execute_batch(SCHEMA)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            info!(version = SCHEMA_VERSION, "Created settings schema");
            Ok(())
        }
        SCHEMA_VERSION => Ok(()),
        newer => Err(DbError::MigrationFailed(format!(
            "Settings schema version {newer} is newer than supported version {SCHEMA_VERSION}"
        ))),
    }
}

fn user_version(conn: &Connection) -> DbResult<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
