// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for the tutor client.
//!
//! Provides SQLite and in-memory [`KeyValueStore`](tutor_core::KeyValueStore)
//! backends, the fail-soft [`Preferences`] facade used by the chat client, and
//! dated JSON export of the conversation history.

pub mod database;
pub mod export;
pub mod migrations;
pub mod preferences;
pub mod store;

pub use export::{export_chat_history, export_file_name};
pub use preferences::Preferences;
pub use store::{MemoryStore, SqliteStore};
