// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! A single connection serves all reads and writes; callers share it
//! through the mutex in [`crate::SqliteStore`].

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;
use tutor_core::TutorError;

use crate::migrations::run_migrations;

/// Maps a rusqlite error onto the shared error type.
pub(crate) fn map_sql_err(e: rusqlite::Error) -> TutorError {
    TutorError::Storage {
        source: Box::new(e),
    }
}

/// Opens (creating if needed) the database at `path` and applies migrations.
pub fn open(path: &str) -> Result<Connection, TutorError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TutorError::Storage {
                source: Box::new(e),
            })?;
        }
    }

    let mut conn = Connection::open(path).map_err(map_sql_err)?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(map_sql_err)?;
    run_migrations(&mut conn).map_err(map_sql_err)?;

    debug!(path, "database opened");
    Ok(conn)
}

/// Opens a private in-memory database with the schema applied.
pub fn open_in_memory() -> Result<Connection, TutorError> {
    let mut conn = Connection::open_in_memory().map_err(map_sql_err)?;
    run_migrations(&mut conn).map_err(map_sql_err)?;
    Ok(conn)
}
