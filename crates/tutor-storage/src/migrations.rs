// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations.
//!
//! SQL files are compiled into the binary and applied in order on open.
//! Progress is tracked in SQLite's `user_version` pragma.

use rusqlite::Connection;
use tracing::debug;

/// Ordered migrations; index + 1 is the schema version after applying.
const MIGRATIONS: &[(&str, &str)] = &[(
    "V1__key_value",
    include_str!("../migrations/V1__key_value.sql"),
)];

/// Apply every migration newer than the connection's `user_version`.
pub fn run_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    let current: usize = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = index + 1;
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        debug!(migration = name, version, "applied migration");
    }
    Ok(())
}

/// Latest schema version known to this build.
pub fn latest_version() -> usize {
    MIGRATIONS.len()
}
