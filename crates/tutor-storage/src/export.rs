// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON export of the chat history.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;
use tutor_core::{Message, TutorError};

/// `chat-history-YYYY-MM-DD.json` for the given date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("chat-history-{}.json", date.format("%Y-%m-%d"))
}

/// Writes `messages` as pretty-printed JSON into `dir`, named by today's UTC date.
///
/// Unlike the other history accessors, failures here are returned.
pub fn export_chat_history(messages: &[Message], dir: &Path) -> Result<PathBuf, TutorError> {
    export_chat_history_on(messages, dir, Utc::now().date_naive())
}

pub fn export_chat_history_on(
    messages: &[Message],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, TutorError> {
    let json = serde_json::to_string_pretty(messages).map_err(|e| TutorError::Storage {
        source: Box::new(e),
    })?;

    let path = dir.join(export_file_name(date));
    std::fs::write(&path, json).map_err(|e| TutorError::Storage {
        source: Box::new(e),
    })?;

    info!(path = %path.display(), messages = messages.len(), "exported chat history");
    Ok(path)
}
