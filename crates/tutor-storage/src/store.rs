// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store backends.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;
use tutor_config::model::StorageConfig;
use tutor_core::{AdapterType, HealthStatus, KeyValueStore, PluginAdapter, TutorError};

use crate::database::{self, map_sql_err};

fn poisoned(what: &str) -> TutorError {
    TutorError::Storage {
        source: format!("{what} lock poisoned").into(),
    }
}

/// SQLite-backed store: one `kv` table, one row per key.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteStore {
    pub fn open(config: &StorageConfig) -> Result<Self, TutorError> {
        Self::open_path(&config.database_path)
    }

    pub fn open_path(path: &str) -> Result<Self, TutorError> {
        let conn = database::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self, TutorError> {
        Ok(Self {
            conn: Mutex::new(database::open_in_memory()?),
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TutorError> {
        self.conn.lock().map_err(|_| poisoned("database"))
    }
}

impl KeyValueStore for SqliteStore {
    fn save(&self, key: &str, value: &str) -> Result<(), TutorError> {
        self.conn()?
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )
            .map_err(map_sql_err)?;
        debug!(key, bytes = value.len(), "saved key");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, TutorError> {
        self.conn()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sql_err)
    }

    fn remove(&self, key: &str) -> Result<(), TutorError> {
        self.conn()?
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(map_sql_err)?;
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        let ping = self.conn()?.execute_batch("SELECT 1;");
        match ping {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, like a full or read-only disk.
    pub fn unavailable() -> Self {
        Self {
            values: Mutex::default(),
            unavailable: true,
        }
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, TutorError> {
        if self.unavailable {
            return Err(TutorError::Storage {
                source: "storage unavailable".into(),
            });
        }
        self.values.lock().map_err(|_| poisoned("memory store"))
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&self, key: &str, value: &str) -> Result<(), TutorError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, TutorError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), TutorError> {
        self.values()?.remove(key);
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        if self.unavailable {
            Ok(HealthStatus::Unhealthy("storage unavailable".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}
