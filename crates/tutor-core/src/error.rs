// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the tutor client.

use thiserror::Error;

/// The primary error type used across the tutor crates.
///
/// Every variant except [`TutorError::Storage`] and [`TutorError::Internal`]
/// corresponds to a failure of a completion call; the UI layer prints the
/// `Display` text verbatim as a chat notice.
#[derive(Debug, Error)]
pub enum TutorError {
    /// Configuration errors (missing API credential, invalid header values).
    ///
    /// Raised before any network I/O takes place.
    #[error("configuration error: {0}")]
    Config(String),

    /// The completion endpoint answered with a non-success status.
    ///
    /// `message` carries the provider's own error text when the body had one.
    #[error("{message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// The endpoint answered with success but the body lacked the expected field.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// The caller aborted the request through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// Connection, TLS, or body-read failures below the HTTP status level.
    #[error("network error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persistence backend errors (only surfaced by export and store construction).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TutorError {
    /// Returns true when the error was caused by caller-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TutorError::Cancelled)
    }
}
